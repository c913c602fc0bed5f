//! # Mock Ledger
//!
//! Utilities for testing code that talks to a [`LedgerClient`] without a real sink.
//!
//! Use [`create_mock_client`] to get a client and the raw receiver, then pull
//! requests with [`expect_record`]. For a fluent style, [`MockLedger`] answers
//! queued expectations from a background task and keeps every entry it saw.

use crate::ledger::{LedgerClient, LedgerEntry, LedgerError, LedgerRequest, Response, SinkKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Creates a client whose requests arrive on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (LedgerClient, mpsc::Receiver<LedgerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

/// Returns the next request if it is a `Record`.
pub async fn expect_record(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(LedgerEntry, Response<SinkKind>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Record { entry, respond_to }) => Some((entry, respond_to)),
        _ => None,
    }
}

/// Returns the next request's responder if it is a `Shutdown`.
pub async fn expect_shutdown(receiver: &mut mpsc::Receiver<LedgerRequest>) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(LedgerRequest::Shutdown { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// A scripted ledger.
///
/// # Example
/// ```ignore
/// let mock = MockLedger::new();
/// mock.expect_record().return_ok(SinkKind::Primary);
///
/// let service = RestaurantService::with_parts(name, catalog, numbers, mock.client(), None);
/// // ... finalize an order ...
/// mock.verify();
/// assert_eq!(mock.recorded().len(), 1);
/// ```
pub struct MockLedger {
    client: LedgerClient,
    expectations: Arc<Mutex<VecDeque<Result<SinkKind, LedgerError>>>>,
    recorded: Arc<Mutex<Vec<LedgerEntry>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockLedger {
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (client, mut receiver) = create_mock_client(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let exps = expectations.clone();
        let seen = recorded.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    LedgerRequest::Record { entry, respond_to } => {
                        let next = exps.lock().unwrap().pop_front();
                        let Some(response) = next else {
                            panic!("Unexpected record for order {}", entry.number);
                        };
                        seen.lock().unwrap().push(entry);
                        let _ = respond_to.send(response);
                    }
                    LedgerRequest::Shutdown { respond_to } => {
                        let _ = respond_to.send(Ok(()));
                        break;
                    }
                }
            }
        });

        Self {
            client,
            expectations,
            recorded,
            _handle: handle,
        }
    }

    pub fn client(&self) -> LedgerClient {
        self.client.clone()
    }

    /// Expects one more `record` call.
    pub fn expect_record(&self) -> RecordExpectationBuilder {
        RecordExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Entries received so far, in arrival order.
    pub fn recorded(&self) -> Vec<LedgerEntry> {
        self.recorded.lock().unwrap().clone()
    }

    /// Panics if any expectation is still pending.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `record` expectations.
pub struct RecordExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<SinkKind, LedgerError>>>>,
}

impl RecordExpectationBuilder {
    pub fn return_ok(self, kind: SinkKind) {
        self.expectations.lock().unwrap().push_back(Ok(kind));
    }

    pub fn return_err(self, error: LedgerError) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}
