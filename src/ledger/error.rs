//! Error types for the order ledger.

use thiserror::Error;

/// Errors that can occur while recording orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// Only orders with a number and timestamp can be recorded.
    #[error("Order has not been finalized")]
    NotFinalized,

    /// The file, the fallback file and the console all refused the record.
    #[error("All ledger sinks failed: {0}")]
    AllSinksFailed(String),

    #[error("Ledger actor closed")]
    ActorClosed,

    #[error("Ledger actor dropped response channel")]
    ActorDropped,
}
