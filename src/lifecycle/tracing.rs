//! # Tracing
//!
//! Structured logging for the whole restaurant, configured from `RUST_LOG`.
//!
//! Logs go to stderr so they never mix with the console's menu and receipts on
//! stdout.
//!
//! ```bash
//! # Checkout and ledger activity
//! RUST_LOG=info cargo run
//!
//! # Every add/remove and rejected menu line
//! RUST_LOG=debug cargo run
//!
//! # Only the ledger
//! RUST_LOG=restaurant_orders::ledger=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a checkout reads:
//!
//! ```text
//! INFO Recorded order=3 kind=Primary
//! INFO finalize_order: Order finalized number=3 kind=Primary
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Panics if one is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns `false` instead of panicking when a
/// subscriber is already installed. Integration tests call it once per test.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
