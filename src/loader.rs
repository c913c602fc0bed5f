//! # Menu File Loader
//!
//! Reads the menu from a text file with one `name ; price` pair per line.
//! Blank lines and lines starting with `#` are ignored. Bad lines are logged
//! with their line number and skipped so one typo does not empty the menu.
//!
//! ```text
//! # name          ; price
//! Pizza           ; 250
//! Salad           ; 30.5
//! ```

use crate::model::{CatalogError, MenuCatalog};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Loads and validates the menu at `path`.
///
/// # Errors
/// `CatalogError::Unreadable` if the file cannot be read.
pub fn load_menu(path: impl AsRef<Path>) -> Result<MenuCatalog, CatalogError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| CatalogError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let catalog = parse_menu(&text, &path.display().to_string())?;
    info!(path = %path.display(), items = catalog.len(), "Menu loaded");
    Ok(catalog)
}

/// Like [`load_menu`], but a missing or unreadable file yields an empty catalog.
pub fn load_menu_or_empty(path: impl AsRef<Path>) -> MenuCatalog {
    match load_menu(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Menu unavailable, no orders can be taken");
            MenuCatalog::empty()
        }
    }
}

/// Parses menu text. `source` only labels the warnings.
pub fn parse_menu(text: &str, source: &str) -> Result<MenuCatalog, CatalogError> {
    let mut items: Vec<(String, f64)> = Vec::new();
    let mut names = HashSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        let [name, price] = fields.as_slice() else {
            warn!(source, line = line_no, "Invalid menu data: expected `name ; price`");
            continue;
        };
        let Ok(price) = price.parse::<f64>() else {
            warn!(source, line = line_no, price, "Invalid menu data: bad price");
            continue;
        };
        if name.is_empty() || !price.is_finite() || price <= 0.0 || names.contains(*name) {
            warn!(source, line = line_no, name, price, "Invalid menu data");
            continue;
        }

        names.insert(name.to_string());
        items.push((name.to_string(), price));
    }

    MenuCatalog::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use std::io::Write;

    #[test]
    fn test_parses_names_and_prices_in_order() {
        let text = "# comment\n\nPizza ; 250\n  Salad;30.5  \n";
        let catalog = parse_menu(text, "inline").unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ItemId(1)).unwrap().name, "Pizza");
        assert_eq!(catalog.price(ItemId(2)), Some(30.5));
    }

    #[test]
    fn test_skips_malformed_lines() {
        let text = "Pizza ; 250\n\
                    no separator here\n\
                    Soup ; cheap\n\
                    Water ; 0\n\
                    Juice ; -3\n\
                    ; 10\n\
                    Pizza ; 99\n\
                    Tea ; 20 ; extra\n\
                    Salad ; 30\n";
        let catalog = parse_menu(text, "inline").unwrap();

        let names: Vec<_> = catalog.lines().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Salad"]);
        assert_eq!(catalog.get(ItemId(1)).unwrap().unit_price, 250.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Pizza ; 250").unwrap();
        writeln!(file, "Salad ; 30").unwrap();

        let catalog = load_menu(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_menu(dir.path().join("nope.txt"));
        assert!(matches!(result, Err(CatalogError::Unreadable { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_menu_or_empty(dir.path().join("nope.txt"));
        assert!(catalog.is_empty());
    }
}
