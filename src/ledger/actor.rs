//! # Ledger Actor
//!
//! The single writer for the order ledger. It owns the [`SinkCascade`] and the
//! receiving end of the request channel, and handles one request at a time, so
//! records from concurrent checkouts are written whole and never interleave.
//! No lock is needed around the sink: the task owns it outright.

use crate::ledger::{LedgerClient, LedgerRequest, SinkCascade};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct LedgerActor {
    receiver: mpsc::Receiver<LedgerRequest>,
    sink: SinkCascade,
    recorded: u64,
}

impl LedgerActor {
    /// Creates the actor and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel. When it is full,
    ///   callers wait until the actor catches up.
    /// * `sink` - Where records are written.
    pub fn new(buffer_size: usize, sink: SinkCascade) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            sink,
            recorded: 0,
        };
        (actor, LedgerClient::new(sender))
    }

    /// Processes requests until a `Shutdown` arrives or every client is dropped.
    /// The sink is flushed and closed either way.
    pub async fn run(mut self) {
        info!("Ledger started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Record { entry, respond_to } => {
                    debug!(order = %entry.number, "Record");
                    let result = self.sink.write_record(&entry.text);
                    match &result {
                        Ok(kind) => {
                            self.recorded += 1;
                            info!(order = %entry.number, ?kind, "Recorded");
                        }
                        Err(e) => warn!(order = %entry.number, error = %e, "Record failed"),
                    }
                    let _ = respond_to.send(result);
                }
                LedgerRequest::Shutdown { respond_to } => {
                    let _ = respond_to.send(self.sink.close());
                    self.receiver.close();
                    break;
                }
            }
        }

        if let Err(e) = self.sink.close() {
            warn!(error = %e, "Ledger close failed");
        }
        info!(recorded = self.recorded, "Ledger shutdown");
    }
}
