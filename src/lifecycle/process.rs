//! The process-wide restaurant.
//!
//! Exactly one [`RestaurantService`] may be installed per process. It is built
//! by an explicit [`init`] and afterwards reached through [`instance`]; there
//! is no lazy construction on first use.

use crate::config::RestaurantConfig;
use crate::lifecycle::{RestaurantService, ServiceError};
use std::sync::OnceLock;
use tracing::warn;

static RESTAURANT: OnceLock<RestaurantService> = OnceLock::new();

/// Starts the restaurant described by `config` and installs it.
///
/// Must be called inside a Tokio runtime. A second call, even a concurrent
/// one, fails with [`ServiceError::AlreadyInitialized`] and leaves the first
/// restaurant in place.
pub fn init(config: &RestaurantConfig) -> Result<&'static RestaurantService, ServiceError> {
    if RESTAURANT.get().is_some() {
        return Err(ServiceError::AlreadyInitialized);
    }
    let service = RestaurantService::start(config);
    if RESTAURANT.set(service).is_err() {
        // Lost the race; the dropped service's ledger stops when its client goes away.
        warn!("Restaurant was initialized concurrently");
        return Err(ServiceError::AlreadyInitialized);
    }
    instance()
}

/// The installed restaurant.
pub fn instance() -> Result<&'static RestaurantService, ServiceError> {
    RESTAURANT.get().ok_or(ServiceError::NotInitialized)
}
