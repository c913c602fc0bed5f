//! # Ledger Client
//!
//! Cheap, cloneable handle for sending requests to the [`LedgerActor`](crate::ledger::LedgerActor).

use crate::ledger::{LedgerEntry, LedgerError, LedgerRequest, SinkKind};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
}

impl LedgerClient {
    pub fn new(sender: mpsc::Sender<LedgerRequest>) -> Self {
        Self { sender }
    }

    /// Appends one record and reports which sink took it.
    #[instrument(skip(self, entry), fields(order = %entry.number))]
    pub async fn record(&self, entry: LedgerEntry) -> Result<SinkKind, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Record { entry, respond_to })
            .await
            .map_err(|_| LedgerError::ActorClosed)?;
        response.await.map_err(|_| LedgerError::ActorDropped)?
    }

    /// Asks the actor to flush, close its sink and stop.
    pub async fn shutdown(&self) -> Result<(), LedgerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::Shutdown { respond_to })
            .await
            .map_err(|_| LedgerError::ActorClosed)?;
        response.await.map_err(|_| LedgerError::ActorDropped)?
    }
}
