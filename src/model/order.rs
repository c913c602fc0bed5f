//! Represents one customer's order while it is being built and after checkout.
//!
//! Quantities are kept per catalog item. Bad input (an id outside the menu, a
//! non-positive quantity) is reported as an [`OrderError`] and logged, and the
//! order is left untouched so one bad keystroke never kills a session.
//!
//! Once finalized, the order number and timestamp are fixed and every
//! mutating call fails with [`OrderError::AlreadyFinalized`].

use crate::model::{
    DiscountPolicy, ItemId, MenuCatalog, NoDiscount, OrderError, Receipt, ReceiptLine,
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Type-safe identifier for finalized orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderNumber(pub u64);

impl From<u64> for OrderNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number and time stamped onto an order at checkout. Always set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalization {
    pub number: OrderNumber,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Order {
    catalog: Arc<MenuCatalog>,
    quantities: Vec<u64>,
    discount: Arc<dyn DiscountPolicy>,
    finalization: Option<Finalization>,
}

impl Order {
    /// Creates an empty order against the given menu.
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        let quantities = vec![0; catalog.len()];
        Self {
            catalog,
            quantities,
            discount: Arc::new(NoDiscount),
            finalization: None,
        }
    }

    /// Replaces the discount policy applied by [`Order::total`].
    pub fn with_discount(mut self, discount: Arc<dyn DiscountPolicy>) -> Self {
        self.discount = discount;
        self
    }

    pub fn catalog(&self) -> &Arc<MenuCatalog> {
        &self.catalog
    }

    /// Adds `quantity` units of an item.
    ///
    /// # Arguments
    /// * `id` - Menu item number, starting at 1
    /// * `quantity` - Units to add; must be positive
    ///
    /// # Errors
    /// `InvalidQuantity` if `quantity <= 0`, `InvalidItem` if the id is not on the menu.
    pub fn add_item(&mut self, id: ItemId, quantity: i64) -> Result<(), OrderError> {
        self.ensure_open()?;
        if quantity <= 0 {
            debug!(%id, quantity, "add_item: rejected quantity");
            return Err(OrderError::InvalidQuantity(quantity));
        }
        let slot = self.slot(id, "add_item")?;
        self.quantities[slot] = self.quantities[slot].saturating_add(quantity as u64);
        Ok(())
    }

    /// Removes every unit of an item.
    pub fn remove_item(&mut self, id: ItemId) -> Result<(), OrderError> {
        self.ensure_open()?;
        let slot = self.slot(id, "remove_item")?;
        self.quantities[slot] = 0;
        Ok(())
    }

    /// Removes up to `quantity` units of an item. Removing more than the order
    /// holds leaves zero; that is not an error.
    pub fn remove_quantity(&mut self, id: ItemId, quantity: i64) -> Result<(), OrderError> {
        self.ensure_open()?;
        let slot = self.slot(id, "remove_quantity")?;
        if quantity < 0 {
            debug!(%id, quantity, "remove_quantity: rejected quantity");
            return Err(OrderError::InvalidQuantity(quantity));
        }
        self.quantities[slot] = self.quantities[slot].saturating_sub(quantity as u64);
        Ok(())
    }

    /// Units of `id` in the order; 0 for an id that is not on the menu.
    pub fn quantity_of(&self, id: ItemId) -> u64 {
        match self.slot(id, "quantity_of") {
            Ok(slot) => self.quantities[slot],
            Err(_) => 0,
        }
    }

    /// Sum of quantity times unit price, before discounts.
    pub fn subtotal(&self) -> f64 {
        self.catalog
            .lines()
            .zip(&self.quantities)
            .map(|(line, &qty)| qty as f64 * line.unit_price)
            .sum()
    }

    /// Amount due. Recomputed on every call.
    pub fn total(&self) -> f64 {
        self.discount.apply(self.subtotal())
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.iter().all(|&qty| qty == 0)
    }

    /// Ids with a non-zero quantity, ascending.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.quantities
            .iter()
            .enumerate()
            .filter(|(_, qty)| **qty > 0)
            .map(|(slot, _)| ItemId(slot as u32 + 1))
            .collect()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalization.is_some()
    }

    pub fn finalization(&self) -> Option<Finalization> {
        self.finalization
    }

    pub fn number(&self) -> Option<OrderNumber> {
        self.finalization.map(|f| f.number)
    }

    pub fn timestamp(&self) -> Option<DateTime<Local>> {
        self.finalization.map(|f| f.timestamp)
    }

    /// Read-only view for printing. Works before and after checkout.
    pub fn receipt(&self) -> Receipt {
        let lines = self
            .item_ids()
            .into_iter()
            .filter_map(|id| {
                let line = self.catalog.get(id)?;
                let quantity = self.quantity_of(id);
                Some(ReceiptLine {
                    id,
                    name: line.name.clone(),
                    quantity,
                    unit_price: line.unit_price,
                    line_total: quantity as f64 * line.unit_price,
                })
            })
            .collect();

        Receipt {
            number: self.number(),
            timestamp: self.timestamp(),
            lines,
            total: self.total(),
        }
    }

    /// Stamps the order number and time in one step.
    pub(crate) fn finalize(
        &mut self,
        number: OrderNumber,
        timestamp: DateTime<Local>,
    ) -> Result<(), OrderError> {
        self.ensure_open()?;
        self.finalization = Some(Finalization { number, timestamp });
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), OrderError> {
        match self.finalization {
            Some(f) => Err(OrderError::AlreadyFinalized(f.number.0)),
            None => Ok(()),
        }
    }

    fn slot(&self, id: ItemId, op: &'static str) -> Result<usize, OrderError> {
        if self.catalog.contains(id) {
            Ok(id.0 as usize - 1)
        } else {
            warn!(%id, op, "invalid item number");
            Err(OrderError::InvalidItem(id))
        }
    }
}
