//! # Restaurant Service
//!
//! The one place the console layer goes for the menu and for checkout. It owns
//! the menu, the order number generator and the ledger client, and wires them
//! together at construction time.
//!
//! Checkout takes the order number first and writes the ledger afterwards, so
//! numbering never waits on disk and no record is written before its order
//! has a number.

use crate::config::{ConfigError, RestaurantConfig};
use crate::ledger::{self, LedgerClient, LedgerEntry, LedgerError};
use crate::loader;
use crate::model::{MenuCatalog, Order, OrderError, OrderNumber};
use crate::numbering::OrderNumberGenerator;
use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Errors returned by the restaurant service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The order already went through checkout.
    #[error("Order already finalized as number {0}")]
    AlreadyFinalized(OrderNumber),

    #[error("Cannot check out an empty order")]
    EmptyOrder,

    /// The order was built against a different menu than this service's.
    #[error("Order does not belong to this restaurant's menu")]
    ForeignCatalog,

    #[error("Restaurant has shut down")]
    ShutDown,

    /// The order was numbered but no sink accepted the record. The order keeps its number.
    #[error("Order {number} was finalized but could not be recorded: {source}")]
    Record {
        number: OrderNumber,
        #[source]
        source: LedgerError,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Restaurant already initialized")]
    AlreadyInitialized,

    #[error("Restaurant not initialized")]
    NotInitialized,
}

/// What the console layer may ask of a restaurant.
#[async_trait]
pub trait Restaurant: Send + Sync {
    fn name(&self) -> &str;

    /// The menu. The same catalog for the life of the service.
    fn menu(&self) -> Arc<MenuCatalog>;

    /// A fresh, empty order against [`menu`](Restaurant::menu).
    fn new_order(&self) -> Order {
        Order::new(self.menu())
    }

    /// Numbers, timestamps and records the order. Returns its order number.
    async fn finalize_order(&self, order: &mut Order) -> Result<OrderNumber, ServiceError>;

    /// Flushes and closes the ledger. Safe to call more than once.
    async fn shutdown(&self) -> Result<(), ServiceError>;
}

pub struct RestaurantService {
    name: String,
    menu: Arc<MenuCatalog>,
    numbers: OrderNumberGenerator,
    ledger: LedgerClient,
    ledger_handle: Mutex<Option<JoinHandle<()>>>,
    /// `true` once shut down. Checkout holds it for read from numbering until
    /// the ledger replies; shutdown takes it for write.
    closed: RwLock<bool>,
}

impl RestaurantService {
    /// Loads the menu and starts the ledger described by `config`.
    ///
    /// A missing menu file is logged and leaves the restaurant with an empty
    /// menu rather than failing. Must be called inside a Tokio runtime.
    pub fn start(config: &RestaurantConfig) -> Self {
        let menu = loader::load_menu_or_empty(&config.menu_path);
        let (ledger, handle) = ledger::spawn(config.ledger.channel_capacity, config.ledger.sink());
        info!(name = %config.name, items = menu.len(), "Restaurant started");
        Self::with_parts(
            config.name.clone(),
            Arc::new(menu),
            OrderNumberGenerator::new(),
            ledger,
            Some(handle),
        )
    }

    /// Assembles a service from already-built parts.
    ///
    /// # Arguments
    /// * `ledger_handle` - The ledger actor's task, awaited on shutdown; `None` for mocks
    pub fn with_parts(
        name: impl Into<String>,
        menu: Arc<MenuCatalog>,
        numbers: OrderNumberGenerator,
        ledger: LedgerClient,
        ledger_handle: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            name: name.into(),
            menu,
            numbers,
            ledger,
            ledger_handle: Mutex::new(ledger_handle),
            closed: RwLock::new(false),
        }
    }

    pub async fn is_shut_down(&self) -> bool {
        *self.closed.read().await
    }

    fn check_can_finalize(&self, closed: bool, order: &Order) -> Result<(), ServiceError> {
        if closed {
            return Err(ServiceError::ShutDown);
        }
        if let Some(number) = order.number() {
            return Err(ServiceError::AlreadyFinalized(number));
        }
        if !Arc::ptr_eq(order.catalog(), &self.menu) {
            return Err(ServiceError::ForeignCatalog);
        }
        if order.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }
        Ok(())
    }
}

#[async_trait]
impl Restaurant for RestaurantService {
    fn name(&self) -> &str {
        &self.name
    }

    fn menu(&self) -> Arc<MenuCatalog> {
        self.menu.clone()
    }

    #[instrument(skip(self, order), fields(total = order.total()))]
    async fn finalize_order(&self, order: &mut Order) -> Result<OrderNumber, ServiceError> {
        let closed = self.closed.read().await;
        if let Err(e) = self.check_can_finalize(*closed, order) {
            warn!(error = %e, "Checkout rejected");
            return Err(e);
        }

        let number = self.numbers.next();
        order.finalize(number, Local::now())?;
        let entry = LedgerEntry::from_order(order)?;

        match self.ledger.record(entry).await {
            Ok(kind) => {
                info!(%number, ?kind, "Order finalized");
                Ok(number)
            }
            Err(source) => {
                error!(%number, error = %source, "Order finalized but not recorded");
                Err(ServiceError::Record { number, source })
            }
        }
    }

    async fn shutdown(&self) -> Result<(), ServiceError> {
        {
            // Waits for checkouts already past the gate to get their ledger reply.
            let mut closed = self.closed.write().await;
            if *closed {
                return Ok(());
            }
            *closed = true;
        }
        info!(name = %self.name, "Restaurant shutting down");

        let result = match self.ledger.shutdown().await {
            Ok(()) | Err(LedgerError::ActorClosed) => Ok(()),
            Err(e) => Err(ServiceError::Ledger(e)),
        };

        if let Some(handle) = self.ledger_handle.lock().await.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Ledger task ended abnormally");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::mock::{create_mock_client, expect_record, expect_shutdown, MockLedger};
    use crate::ledger::SinkKind;
    use crate::model::ItemId;

    fn menu() -> Arc<MenuCatalog> {
        Arc::new(MenuCatalog::new(vec![("Pizza", 250.0), ("Salad", 30.0)]).unwrap())
    }

    fn service_with(mock: &MockLedger) -> RestaurantService {
        RestaurantService::with_parts("Test", menu(), OrderNumberGenerator::new(), mock.client(), None)
    }

    #[tokio::test]
    async fn test_finalize_stamps_number_and_records() {
        let mock = MockLedger::new();
        mock.expect_record().return_ok(SinkKind::Primary);
        let service = service_with(&mock);

        let mut order = service.new_order();
        order.add_item(ItemId(1), 2).unwrap();
        order.add_item(ItemId(2), 1).unwrap();

        let number = service.finalize_order(&mut order).await.unwrap();

        assert_eq!(number, OrderNumber(1));
        assert_eq!(order.number(), Some(number));
        assert!(order.timestamp().is_some());
        mock.verify();

        let recorded = mock.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].number, number);
        assert_eq!(Some(recorded[0].timestamp), order.timestamp());
        assert!(recorded[0].text.contains("530.00"));
    }

    #[tokio::test]
    async fn test_second_finalize_fails_and_keeps_number() {
        let mock = MockLedger::new();
        mock.expect_record().return_ok(SinkKind::Primary);
        let service = service_with(&mock);

        let mut order = service.new_order();
        order.add_item(ItemId(1), 1).unwrap();
        let first = service.finalize_order(&mut order).await.unwrap();

        let second = service.finalize_order(&mut order).await;

        assert!(matches!(second, Err(ServiceError::AlreadyFinalized(n)) if n == first));
        assert_eq!(order.number(), Some(first));
        mock.verify();
        assert_eq!(mock.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected_without_consuming_a_number() {
        let mock = MockLedger::new();
        mock.expect_record().return_ok(SinkKind::Primary);
        let service = service_with(&mock);

        let mut empty = service.new_order();
        assert!(matches!(
            service.finalize_order(&mut empty).await,
            Err(ServiceError::EmptyOrder)
        ));

        let mut order = service.new_order();
        order.add_item(ItemId(2), 1).unwrap();
        assert_eq!(service.finalize_order(&mut order).await.unwrap(), OrderNumber(1));
    }

    #[tokio::test]
    async fn test_order_from_another_menu_is_rejected() {
        let mock = MockLedger::new();
        let service = service_with(&mock);

        let mut order = Order::new(menu());
        order.add_item(ItemId(1), 1).unwrap();

        assert!(matches!(
            service.finalize_order(&mut order).await,
            Err(ServiceError::ForeignCatalog)
        ));
        assert!(!order.is_finalized());
    }

    #[tokio::test]
    async fn test_ledger_failure_keeps_assigned_number() {
        let mock = MockLedger::new();
        mock.expect_record()
            .return_err(LedgerError::AllSinksFailed("disk on fire".into()));
        let service = service_with(&mock);

        let mut order = service.new_order();
        order.add_item(ItemId(1), 1).unwrap();
        let result = service.finalize_order(&mut order).await;

        assert!(matches!(
            result,
            Err(ServiceError::Record { number: OrderNumber(1), .. })
        ));
        assert_eq!(order.number(), Some(OrderNumber(1)));
    }

    #[tokio::test]
    async fn test_number_is_assigned_before_the_record_is_sent() {
        let (client, mut receiver) = create_mock_client(4);
        let service = Arc::new(RestaurantService::with_parts(
            "Test",
            menu(),
            OrderNumberGenerator::starting_at(10),
            client,
            None,
        ));

        let svc = service.clone();
        let task = tokio::spawn(async move {
            let mut order = svc.new_order();
            order.add_item(ItemId(1), 1).unwrap();
            svc.finalize_order(&mut order).await
        });

        let (entry, responder) = expect_record(&mut receiver).await.expect("Expected Record request");
        assert_eq!(entry.number, OrderNumber(10));
        assert!(entry.text.starts_with("Order No. 10\n"));
        responder.send(Ok(SinkKind::Console)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), OrderNumber(10));
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_checkout_in_flight() {
        let (client, mut receiver) = create_mock_client(4);
        let service = Arc::new(RestaurantService::with_parts("Test", menu(), OrderNumberGenerator::new(), client, None));

        let svc = service.clone();
        let checkout = tokio::spawn(async move {
            let mut order = svc.new_order();
            order.add_item(ItemId(1), 1).unwrap();
            svc.finalize_order(&mut order).await
        });
        let (entry, record_responder) = expect_record(&mut receiver).await.expect("Expected Record request");

        let svc = service.clone();
        let shutdown = tokio::spawn(async move { svc.shutdown().await });
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(receiver.try_recv().is_err(), "shutdown overtook a numbered order");

        record_responder.send(Ok(SinkKind::Primary)).unwrap();
        assert_eq!(checkout.await.unwrap().unwrap(), entry.number);

        let shutdown_responder = expect_shutdown(&mut receiver).await.expect("Expected Shutdown request");
        shutdown_responder.send(Ok(())).unwrap();
        shutdown.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent_and_blocks_checkout() {
        let (client, mut receiver) = create_mock_client(4);
        let service = Arc::new(RestaurantService::with_parts("Test", menu(), OrderNumberGenerator::new(), client, None));

        let svc = service.clone();
        let first = tokio::spawn(async move { svc.shutdown().await });
        let responder = expect_shutdown(&mut receiver).await.expect("Expected Shutdown request");
        responder.send(Ok(())).unwrap();
        first.await.unwrap().unwrap();

        service.shutdown().await.unwrap();
        assert!(service.is_shut_down().await);

        let mut order = service.new_order();
        order.add_item(ItemId(1), 1).unwrap();
        assert!(matches!(
            service.finalize_order(&mut order).await,
            Err(ServiceError::ShutDown)
        ));
        assert!(!order.is_finalized());
    }
}
