//! End-to-end flows over the seeded sample shop.
//!
//! Everything here goes through the `Vetstock` facade against the in-memory
//! store, the way a front end would use the engine.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use tokio::sync::broadcast;

use vetstock_core::{Category, Money};
use vetstock_engine::codec::collections;
use vetstock_engine::seed::seed_database;
use vetstock_engine::{BulkSaleItem, EngineError, NewProduct, Vetstock};
use vetstock_store::{
    Document, DocumentStore, MemoryStore, StoreError, StoreEvent, StoreResult, WriteBatch,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vetstock_engine=debug")
        .with_test_writer()
        .try_init();
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn seeded_shop() -> Vetstock {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    assert!(seed_database(&store).await.unwrap());
    Vetstock::new(store)
}

#[tokio::test]
async fn seeded_shop_is_fully_reconciled() {
    let shop = seeded_shop().await;

    let products = shop.catalog().list_all().await.unwrap();
    assert_eq!(products.len(), 10);
    for product in &products {
        assert!(
            product.stock_is_consistent(),
            "batch {} out of balance",
            product.batch_number
        );
    }

    assert_eq!(shop.ledger().all_sales().await.unwrap().len(), 20);
    assert_eq!(shop.directory().list_customers().await.unwrap().len(), 9);
}

#[tokio::test]
async fn sale_flows_through_ledger_and_dashboard() {
    let shop = seeded_shop().await;

    // Seeded "today": Canine Plus ₹1500 x1 + Chew Toy ₹400 x2 = ₹2300.
    let baseline = shop.dashboard().revenue_for_day(today()).await.unwrap();
    assert_eq!(baseline, Money::from_rupees(2300));

    let product = shop
        .catalog()
        .get_by_id("prod_rabies_vaccine_c")
        .await
        .unwrap();
    let sale = shop
        .reconciliation()
        .record_sale(&product.id, "Ravi Kumar", 2, today())
        .await
        .unwrap();
    assert_eq!(sale.total_amount(), Money::from_rupees(1600));

    let after = shop.dashboard().revenue_for_day(today()).await.unwrap();
    assert_eq!(after, baseline + Money::from_rupees(1600));

    let updated = shop.catalog().get_by_id(&product.id).await.unwrap();
    assert_eq!(updated.stock_in_hand, product.stock_in_hand - 2);
    assert_eq!(updated.items_sold, product.items_sold + 2);
    assert!(updated.stock_is_consistent());

    // The sale is the newest ledger entry for today.
    let todays = shop.ledger().sales_on_date(today()).await.unwrap();
    assert!(todays.iter().any(|s| s.id == sale.id));
}

#[tokio::test]
async fn register_receive_sell_lifecycle() {
    let shop = seeded_shop().await;

    let product = shop
        .catalog()
        .register_product(NewProduct {
            name: "Aquarium Filter".to_string(),
            category: Category::Accessories,
            batch_number: "AQF26A".to_string(),
            price: Money::from_rupees(1200),
            initial_stock: 5,
            expiry_date: None,
            source: Some("Happy Pets Gear".to_string()),
        })
        .await
        .unwrap();

    shop.catalog()
        .receive_stock(&product.id, 10, today())
        .await
        .unwrap();

    shop.reconciliation()
        .record_sale(&product.id, "Sunita Rao", 4, today())
        .await
        .unwrap();

    let finished = shop.catalog().get_by_id(&product.id).await.unwrap();
    assert_eq!(finished.stock_in_hand, 11);
    assert_eq!(finished.items_sold, 4);
    assert_eq!(finished.total_received(), 15);
    assert!(finished.stock_is_consistent());
}

#[tokio::test]
async fn bulk_sale_failure_leaves_seeded_state_untouched() {
    let shop = seeded_shop().await;
    let before = shop.catalog().list_all().await.unwrap();

    let err = shop
        .reconciliation()
        .record_bulk_sale(
            "Vikram Mehta",
            &[
                BulkSaleItem {
                    product_id: "prod_chew_toy_f".to_string(),
                    quantity: 3,
                },
                BulkSaleItem {
                    product_id: "prod_pet_carrier_e".to_string(),
                    quantity: 999,
                },
            ],
            today(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientStock { .. }));

    assert_eq!(shop.catalog().list_all().await.unwrap(), before);
    assert_eq!(shop.ledger().all_sales().await.unwrap().len(), 20);
}

#[tokio::test]
async fn dashboard_figures_over_seeded_week() {
    let shop = seeded_shop().await;

    // Seeded units inside the 7-day window: Feline Fine 3+10, Canine Plus
    // 1+5, Chew Toy 2, Grooming Brush 1, Rabies 1, Carrier 1, Clippers 1.
    let top = shop
        .dashboard()
        .top_seller_last_week(today())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(top.product_name, "Feline Fine Cat Treats");
    assert_eq!(top.quantity, 13);

    // Lepto (25 days) and Vitamin Drops (15 days) sit inside the window.
    assert_eq!(shop.dashboard().expiring_soon_count(today()).await.unwrap(), 2);

    let total: i64 = 85 + 180 + 42 + 45 + 27 + 88 + 55 + 68 + 35 + 42;
    assert_eq!(shop.dashboard().total_stock_in_hand().await.unwrap(), total);

    let series = shop
        .dashboard()
        .daily_revenue_series(today() - Duration::days(6), today())
        .await
        .unwrap();
    assert_eq!(series.len(), 7);
    assert_eq!(series[6].1, Money::from_rupees(2300));
}

#[tokio::test]
async fn store_events_fire_per_committed_document() {
    let shop = seeded_shop().await;
    let mut product_events = shop.store().subscribe(collections::PRODUCTS);
    let mut sale_events = shop.store().subscribe(collections::SALES);

    shop.reconciliation()
        .record_sale("prod_grooming_brush_i", "Anjali Verma", 1, today())
        .await
        .unwrap();

    let event: StoreEvent = product_events.recv().await.unwrap();
    assert_eq!(event.id, "prod_grooming_brush_i");
    assert!(sale_events.recv().await.is_ok());
}

// =============================================================================
// Commit Failure Injection
// =============================================================================

/// Store wrapper whose commits always fail, for exercising the transaction
/// error path.
struct BrokenCommitStore {
    inner: MemoryStore,
}

#[async_trait]
impl DocumentStore for BrokenCommitStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.inner.set(collection, id, document).await
    }

    async fn update(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.inner.update(collection, id, document).await
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.inner.list(collection).await
    }

    async fn commit(&self, _batch: WriteBatch) -> StoreResult<()> {
        Err(StoreError::transaction_failed("backend unavailable"))
    }

    fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe(collection)
    }
}

#[tokio::test]
async fn failed_commit_surfaces_as_transaction_error() {
    init_tracing();
    let store: Arc<dyn DocumentStore> = Arc::new(BrokenCommitStore {
        inner: MemoryStore::new(),
    });
    let shop = Vetstock::new(store);

    let product = shop
        .catalog()
        .register_product(NewProduct {
            name: "Catnip Toy Mouse".to_string(),
            category: Category::Accessories,
            batch_number: "CTM24A".to_string(),
            price: Money::from_rupees(350),
            initial_stock: 40,
            expiry_date: None,
            source: None,
        })
        .await
        .unwrap();

    let err = shop
        .reconciliation()
        .record_sale(&product.id, "Ravi Kumar", 2, today())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Transaction(_)));

    // The input was valid; only persistence failed, and nothing moved.
    let unchanged = shop.catalog().get_by_id(&product.id).await.unwrap();
    assert_eq!(unchanged.stock_in_hand, 40);
    assert_eq!(unchanged.items_sold, 0);
    assert!(shop.ledger().all_sales().await.unwrap().is_empty());
}
