//! Error types for orders and the menu catalog.

use crate::model::ItemId;
use thiserror::Error;

/// Errors that can occur while building or finalizing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The item id is 0 or past the end of the catalog.
    #[error("Invalid item number: {0}")]
    InvalidItem(ItemId),

    /// Quantities must be positive when adding and non-negative when removing.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The order already carries an order number.
    #[error("Order already finalized as number {0}")]
    AlreadyFinalized(u64),
}

/// Errors raised while constructing a [`MenuCatalog`](crate::model::MenuCatalog).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item {position} has an empty name")]
    EmptyName { position: usize },

    #[error("Duplicate menu item: {0}")]
    DuplicateName(String),

    #[error("Invalid price {price} for menu item {name}")]
    InvalidPrice { name: String, price: f64 },

    /// The menu source could not be read at all.
    #[error("Could not read menu file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
