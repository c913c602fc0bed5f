//! # Restaurant Orders
//!
//! Counter-side ordering for a single restaurant: a menu, one order per
//! customer, checkout with a unique sequential order number, and an
//! append-only ledger of every finalized order.
//!
//! ## Design
//!
//! ### Numbering never waits on disk
//! [`OrderNumberGenerator`](numbering::OrderNumberGenerator) is a single
//! atomic counter. Checkout takes the number first and only then sends the
//! record to the ledger, so concurrent checkouts are never serialized behind
//! file I/O, and no record is ever written for an unnumbered order.
//!
//! ### One writer for the ledger
//! The ledger is an actor: one Tokio task owns the output file and processes
//! [`LedgerRequest`](ledger::LedgerRequest)s from an mpsc channel in order.
//! Records from concurrent sessions therefore never interleave, and no lock
//! is held while writing.
//!
//! ### Degrade, never drop
//! When the ledger file cannot be opened or written, the record goes to a
//! fallback file, and failing that to the console. Only a failure at every
//! level is reported as an error, and even then the order keeps its number.
//!
//! ### Typed errors
//! Each component has its own `thiserror` enum ([`OrderError`](model::OrderError),
//! [`LedgerError`](ledger::LedgerError), [`ServiceError`](lifecycle::ServiceError),
//! ...). Invalid input is a failed `Result` plus a `tracing` event; it never
//! aborts a session.
//!
//! ## Module Tour
//!
//! - [`model`] - menu, order, receipt and their errors. No I/O.
//! - [`loader`] - reads a menu file into a [`MenuCatalog`](model::MenuCatalog).
//! - [`numbering`] - the order number counter.
//! - [`ledger`] - the ledger actor, its client, sinks and a mock.
//! - [`lifecycle`] - the [`Restaurant`](lifecycle::Restaurant) service, process-wide handle and tracing setup.
//! - [`config`] - TOML configuration.
//! - [`console`] - the interactive counter terminal.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --menu data/menu.txt --ledger data/orders.log
//! ```

pub mod config;
pub mod console;
pub mod ledger;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod numbering;
