//! The restaurant's menu: an ordered, read-only list of priced items.
//!
//! Items are numbered by load order starting at 1. Id 0 is never handed out;
//! it only exists in the console as "no item".

use crate::model::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// One purchasable item with its unit price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: f64,
}

/// Validated menu. Cheap to share behind an `Arc`; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog {
    lines: Vec<MenuLine>,
}

impl MenuCatalog {
    /// Builds a catalog from `(name, price)` pairs in display order.
    ///
    /// # Errors
    /// Rejects empty names, duplicate names and prices that are not positive and finite.
    pub fn new<S: Into<String>>(items: Vec<(S, f64)>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut lines = Vec::with_capacity(items.len());

        for (index, (name, price)) in items.into_iter().enumerate() {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName { position: index + 1 });
            }
            if !price.is_finite() || price <= 0.0 {
                return Err(CatalogError::InvalidPrice { name, price });
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateName(name));
            }
            lines.push(MenuLine {
                id: ItemId(index as u32 + 1),
                name,
                unit_price: price,
            });
        }

        Ok(Self { lines })
    }

    /// A catalog with nothing on it. Every order against it stays empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.0 >= 1 && (id.0 as usize) <= self.lines.len()
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuLine> {
        if !self.contains(id) {
            return None;
        }
        self.lines.get(id.0 as usize - 1)
    }

    pub fn price(&self, id: ItemId) -> Option<f64> {
        self.get(id).map(|line| line.unit_price)
    }

    /// Iterates the menu in id order.
    pub fn lines(&self) -> impl Iterator<Item = &MenuLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_in_load_order() {
        let catalog = MenuCatalog::new(vec![("Pizza", 250.0), ("Salad", 30.0)]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ItemId(1)).unwrap().name, "Pizza");
        assert_eq!(catalog.get(ItemId(2)).unwrap().name, "Salad");
        assert_eq!(catalog.price(ItemId(2)), Some(30.0));
    }

    #[test]
    fn test_sentinel_and_out_of_range_ids_are_not_contained() {
        let catalog = MenuCatalog::new(vec![("Pizza", 250.0)]).unwrap();

        assert!(!catalog.contains(ItemId(0)));
        assert!(catalog.contains(ItemId(1)));
        assert!(!catalog.contains(ItemId(2)));
        assert!(catalog.get(ItemId(0)).is_none());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = MenuCatalog::new(vec![("Pizza", 250.0), ("Pizza", 200.0)]);
        assert_eq!(result, Err(CatalogError::DuplicateName("Pizza".to_string())));
    }

    #[test]
    fn test_rejects_non_positive_prices() {
        assert!(matches!(
            MenuCatalog::new(vec![("Water", 0.0)]),
            Err(CatalogError::InvalidPrice { .. })
        ));
        assert!(matches!(
            MenuCatalog::new(vec![("Water", -1.0)]),
            Err(CatalogError::InvalidPrice { .. })
        ));
        assert!(matches!(
            MenuCatalog::new(vec![("Water", f64::NAN)]),
            Err(CatalogError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_names() {
        assert_eq!(
            MenuCatalog::new(vec![("Pizza", 250.0), ("  ", 1.0)]),
            Err(CatalogError::EmptyName { position: 2 })
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = MenuCatalog::empty();
        assert!(catalog.is_empty());
        assert!(!catalog.contains(ItemId(1)));
    }
}
