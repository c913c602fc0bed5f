//! # Ledger Messages
//!
//! Requests sent from [`LedgerClient`](crate::ledger::LedgerClient) to the
//! [`LedgerActor`](crate::ledger::LedgerActor), each carrying a one-shot reply channel.

use crate::ledger::{LedgerError, SinkKind};
use crate::model::{Order, OrderNumber};
use chrono::{DateTime, Local};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the ledger actor.
pub type Response<T> = oneshot::Sender<Result<T, LedgerError>>;

/// One finalized order, already rendered as ledger text.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub number: OrderNumber,
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl LedgerEntry {
    /// Renders a finalized order.
    ///
    /// # Errors
    /// `LedgerError::NotFinalized` if the order has no number yet.
    pub fn from_order(order: &Order) -> Result<Self, LedgerError> {
        let stamp = order.finalization().ok_or(LedgerError::NotFinalized)?;
        Ok(Self {
            number: stamp.number,
            timestamp: stamp.timestamp,
            text: order.receipt().to_string(),
        })
    }
}

#[derive(Debug)]
pub enum LedgerRequest {
    Record {
        entry: LedgerEntry,
        respond_to: Response<SinkKind>,
    },
    /// Flush, close the sink and stop the actor.
    Shutdown {
        respond_to: Response<()>,
    },
}
