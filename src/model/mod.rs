//! Pure data structures: the menu, orders and their receipts.

pub mod discount;
pub mod error;
pub mod menu;
pub mod order;
pub mod receipt;

pub use discount::*;
pub use error::*;
pub use menu::*;
pub use order::*;
pub use receipt::*;
