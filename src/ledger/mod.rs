//! # Order Ledger
//!
//! Append-only, write-only record of finalized orders.
//!
//! ## Structure
//!
//! - [`actor`] - [`LedgerActor`], the single writer that owns the sink
//! - [`client`] - [`LedgerClient`], the cloneable handle used by the service
//! - [`message`] - [`LedgerRequest`] and [`LedgerEntry`]
//! - [`sink`] - [`SinkCascade`]: primary file, fallback file, console
//! - [`error`] - [`LedgerError`]
//! - [`mock`] - test doubles for the client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (client, handle) = ledger::spawn(32, SinkCascade::file("data/orders.log", std::env::temp_dir()));
//! client.record(LedgerEntry::from_order(&order)?).await?;
//! client.shutdown().await?;
//! handle.await?;
//! ```

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod sink;

pub use actor::LedgerActor;
pub use client::LedgerClient;
pub use error::LedgerError;
pub use message::{LedgerEntry, LedgerRequest, Response};
pub use sink::{SinkCascade, SinkKind};

use tokio::task::JoinHandle;

/// Creates the ledger actor, spawns it on the current runtime and returns its client.
pub fn spawn(buffer_size: usize, sink: SinkCascade) -> (LedgerClient, JoinHandle<()>) {
    let (actor, client) = LedgerActor::new(buffer_size, sink);
    let handle = tokio::spawn(actor.run());
    (client, handle)
}
