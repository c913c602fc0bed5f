//! # Lifecycle
//!
//! Starting, reaching and stopping the restaurant.
//!
//! [`RestaurantService::start`] loads the menu, spawns the ledger actor and
//! wires both to a fresh [`OrderNumberGenerator`](crate::numbering::OrderNumberGenerator).
//! [`Restaurant::shutdown`] first waits for checkouts that already hold a
//! number to get their ledger reply, then turns new checkouts away, sends the
//! ledger its shutdown request and waits for the actor task. Every numbered
//! order is recorded before it returns.
//!
//! ```rust,ignore
//! let restaurant = lifecycle::init(&config)?;
//!
//! let mut order = restaurant.new_order();
//! order.add_item(ItemId(1), 2)?;
//! let number = restaurant.finalize_order(&mut order).await?;
//!
//! restaurant.shutdown().await?;
//! ```

pub mod process;
pub mod restaurant;
pub mod tracing;

pub use process::{init, instance};
pub use restaurant::{Restaurant, RestaurantService, ServiceError};
pub use tracing::{setup_tracing, try_setup_tracing};
