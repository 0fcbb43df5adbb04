//! # Product Catalog
//!
//! Catalog operations for product batch records.
//!
//! ## Batches vs. Products
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Batches Work                                     │
//! │                                                                         │
//! │  Display name: "Rabies Vaccine (1-year)"                               │
//! │       │                                                                 │
//! │       ├── Batch RABVAC25A  (50 received, 8 sold, 42 in hand)           │
//! │       └── Batch RABVAC25B  (30 received, 0 sold, 30 in hand)           │
//! │                                                                         │
//! │  • register_product creates a NEW batch record                         │
//! │  • receive_stock tops up an EXISTING batch (never creates one)         │
//! │  • find_batches_by_name lets a caller pick among batches               │
//! │                                                                         │
//! │  Stock counters on a batch are only ever decremented by the            │
//! │  reconciliation engine; the catalog handles receipts and reads.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use vetstock_core::validation::{
    validate_batch_number, validate_initial_stock, validate_price_paise, validate_product_name,
    validate_quantity,
};
use vetstock_core::{Category, Money, Product, ReceivedEntry};
use vetstock_store::DocumentStore;

use crate::codec::{collections, decode, encode};
use crate::error::{EngineError, EngineResult};

// =============================================================================
// Registration Input
// =============================================================================

/// Input for registering a new product batch.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub batch_number: String,
    pub price: Money,
    pub initial_stock: i64,
    pub expiry_date: Option<NaiveDate>,
    pub source: Option<String>,
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Catalog store for product batch records.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = ProductCatalog::new(store);
///
/// // Register a new batch
/// let product = catalog.register_product(new_product).await?;
///
/// // Top up stock later
/// let product = catalog.receive_stock(&product.id, 20, date).await?;
/// ```
#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<dyn DocumentStore>,
}

impl ProductCatalog {
    /// Creates a new ProductCatalog over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ProductCatalog { store }
    }

    /// Registers a new product batch.
    ///
    /// ## Validation
    /// - name and batch number must be present and well-formed
    /// - price must be non-negative
    /// - initial stock must be non-negative (zero is fine)
    ///
    /// ## Side Effects
    /// Creates the batch with `items_sold = 0` and a received log holding
    /// one entry: today's date and the initial stock.
    pub async fn register_product(&self, input: NewProduct) -> EngineResult<Product> {
        validate_product_name(&input.name)?;
        validate_batch_number(&input.batch_number)?;
        validate_price_paise(input.price.paise())?;
        validate_initial_stock(input.initial_stock)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category: input.category,
            batch_number: input.batch_number.trim().to_string(),
            source: input.source,
            price_paise: input.price.paise(),
            stock_in_hand: input.initial_stock,
            items_sold: 0,
            expiry_date: input.expiry_date,
            received_log: vec![ReceivedEntry {
                date: Utc::now().date_naive(),
                quantity: input.initial_stock,
            }],
        };

        debug!(id = %product.id, batch = %product.batch_number, "registering product");

        self.store
            .set(collections::PRODUCTS, &product.id, encode(&product)?)
            .await?;

        Ok(product)
    }

    /// Receives stock into an existing batch.
    ///
    /// ## Rules
    /// - The batch must exist (`NotFound` otherwise)
    /// - Quantity must be positive
    /// - A distinct batch number is a NEW batch: it goes through
    ///   `register_product`, never through here
    ///
    /// ## Side Effects
    /// `stock_in_hand += quantity`; `{received_date, quantity}` appended to
    /// the received log. Both land in one document write.
    pub async fn receive_stock(
        &self,
        product_id: &str,
        quantity: i64,
        received_date: NaiveDate,
    ) -> EngineResult<Product> {
        let mut product = self.get_by_id(product_id).await?;
        validate_quantity(quantity)?;

        product.stock_in_hand += quantity;
        product.received_log.push(ReceivedEntry {
            date: received_date,
            quantity,
        });

        debug!(id = %product_id, quantity = %quantity, stock = %product.stock_in_hand, "stock received");

        self.store
            .update(collections::PRODUCTS, product_id, encode(&product)?)
            .await?;

        Ok(product)
    }

    /// Gets a batch by its ID.
    pub async fn get_by_id(&self, product_id: &str) -> EngineResult<Product> {
        let doc = self
            .store
            .get(collections::PRODUCTS, product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;

        decode(doc)
    }

    /// All batches sharing a display name, ordered by batch number.
    ///
    /// Used to let a caller pick among batches of the same named product.
    pub async fn find_batches_by_name(&self, name: &str) -> EngineResult<Vec<Product>> {
        let mut batches: Vec<Product> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|p| p.name == name)
            .collect();
        batches.sort_by(|a, b| a.batch_number.cmp(&b.batch_number));
        Ok(batches)
    }

    /// Lists every batch, ordered by display name then batch number.
    pub async fn list_all(&self) -> EngineResult<Vec<Product>> {
        let docs = self.store.list(collections::PRODUCTS).await?;

        let mut products = Vec::with_capacity(docs.len());
        for doc in docs {
            products.push(decode::<Product>(doc)?);
        }
        products.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.batch_number.cmp(&b.batch_number))
        });
        Ok(products)
    }

    /// Batches whose expiry date falls within `days` of `today`.
    ///
    /// Feeds the dashboard's "expiring soon" count and the expiry
    /// notification flow.
    pub async fn expiring_within(&self, today: NaiveDate, days: i64) -> EngineResult<Vec<Product>> {
        let cutoff = today + chrono::Duration::days(days);
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|p| p.expires_by(cutoff))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
