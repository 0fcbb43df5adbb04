//! # Stock Reconciliation Engine
//!
//! The ONLY component that turns sales into stock movements.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale                                       │
//! │                                                                         │
//! │  1. Fetch batch ──────────────────► NotFound?                          │
//! │  2. Check stock_in_hand >= qty ───► InsufficientStock?                 │
//! │  3. Validate qty, sale date ──────► Validation?                        │
//! │  4. Build batch:                                                        │
//! │       update products/{id}   (stock -= qty, sold += qty)               │
//! │       set    sales/{sale_id} (the ledger entry)                        │
//! │  5. Commit all-or-nothing ────────► Transaction?                       │
//! │                                                                         │
//! │  A sale that decremented stock but left no ledger entry (or the        │
//! │  reverse) can never exist: both writes ride one commit.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bulk sales extend the same shape: every line is checked against a local
//! working copy of the fetched batches, and only a fully valid cart reaches
//! the store, as one commit.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use vetstock_core::validation::{validate_customer_name, validate_quantity, validate_sale_date};
use vetstock_core::{Product, Sale, ValidationError, MAX_BULK_SALE_ITEMS};
use vetstock_store::{DocumentStore, WriteBatch};

use crate::codec::{collections, decode, encode};
use crate::error::{EngineError, EngineResult};
use crate::ledger::SaleLedger;

// =============================================================================
// Sale Inputs
// =============================================================================

/// One line of a bulk sale cart.
#[derive(Debug, Clone)]
pub struct BulkSaleItem {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Reconciliation Engine
// =============================================================================

/// Records sales and keeps stock counters consistent with the ledger.
///
/// ## Usage
/// ```rust,ignore
/// let engine = ReconciliationEngine::new(store);
///
/// let sale = engine
///     .record_sale(&product.id, "Ravi Kumar", 2, today)
///     .await?;
/// ```
#[derive(Clone)]
pub struct ReconciliationEngine {
    store: Arc<dyn DocumentStore>,
}

impl ReconciliationEngine {
    /// Creates a new ReconciliationEngine over a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ReconciliationEngine { store }
    }

    /// Records a single-item sale.
    ///
    /// ## Check Order
    /// 1. The batch must exist
    /// 2. The batch must hold enough stock
    /// 3. Quantity and sale date must be valid
    ///
    /// ## Side Effects
    /// One atomic commit: `stock_in_hand -= quantity`,
    /// `items_sold += quantity`, and the ledger entry. The received log is
    /// never touched by a sale.
    pub async fn record_sale(
        &self,
        product_id: &str,
        customer_name: &str,
        quantity: i64,
        sale_date: NaiveDate,
    ) -> EngineResult<Sale> {
        let doc = self
            .store
            .get(collections::PRODUCTS, product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;
        let mut product: Product = decode(doc)?;

        if !product.can_sell(quantity) {
            return Err(EngineError::InsufficientStock {
                product_name: product.name,
                batch_number: product.batch_number,
                requested: quantity,
                available: product.stock_in_hand,
            });
        }

        validate_quantity(quantity)?;
        validate_customer_name(customer_name)?;
        validate_sale_date(sale_date, Utc::now().date_naive())?;

        product.stock_in_hand -= quantity;
        product.items_sold += quantity;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            customer_name: customer_name.trim().to_string(),
            quantity,
            sale_date,
            total_amount_paise: product.price().multiply_quantity(quantity).paise(),
        };

        let mut batch = WriteBatch::new();
        batch.update(collections::PRODUCTS, &product.id, encode(&product)?);
        SaleLedger::stage_append(&mut batch, &sale)?;
        self.store.commit(batch).await?;

        info!(
            sale_id = %sale.id,
            product = %sale.product_name,
            quantity = %quantity,
            total = %sale.total_amount(),
            "sale recorded"
        );

        Ok(sale)
    }

    /// Records a multi-item sale as one atomic commit.
    ///
    /// ## Rules
    /// - The cart holds 1 to `MAX_BULK_SALE_ITEMS` lines
    /// - Each batch may appear at most once per cart
    /// - Every line is checked against a working copy of the fetched
    ///   batches; the first failing line rejects the whole cart
    ///
    /// ## Why a working copy
    /// Two cart lines for the same named product in different batches are
    /// independent, but stock checks still have to see earlier lines'
    /// decrements before anything is written.
    pub async fn record_bulk_sale(
        &self,
        customer_name: &str,
        items: &[BulkSaleItem],
        sale_date: NaiveDate,
    ) -> EngineResult<Vec<Sale>> {
        validate_customer_name(customer_name)?;
        validate_sale_date(sale_date, Utc::now().date_naive())?;

        if items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }
        if items.len() > MAX_BULK_SALE_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 1,
                max: MAX_BULK_SALE_ITEMS as i64,
            }
            .into());
        }

        // Fetch every referenced batch up front. Any unknown ID rejects the
        // whole cart before stock is examined.
        let mut working: Vec<Product> = Vec::with_capacity(items.len());
        for item in items {
            if let Some(prior) = working.iter().find(|p| p.id == item.product_id) {
                return Err(ValidationError::Duplicate {
                    field: "batch".to_string(),
                    value: prior.batch_number.clone(),
                }
                .into());
            }
            let doc = self
                .store
                .get(collections::PRODUCTS, &item.product_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Product", &item.product_id))?;
            working.push(decode(doc)?);
        }

        // Check and apply each line against the working copies. Nothing has
        // been written yet, so a failure here abandons the cart cleanly.
        let mut sales: Vec<Sale> = Vec::with_capacity(items.len());
        for (item, product) in items.iter().zip(working.iter_mut()) {
            if !product.can_sell(item.quantity) {
                return Err(EngineError::InsufficientStock {
                    product_name: product.name.clone(),
                    batch_number: product.batch_number.clone(),
                    requested: item.quantity,
                    available: product.stock_in_hand,
                });
            }
            validate_quantity(item.quantity)?;

            product.stock_in_hand -= item.quantity;
            product.items_sold += item.quantity;

            sales.push(Sale {
                id: Uuid::new_v4().to_string(),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                customer_name: customer_name.trim().to_string(),
                quantity: item.quantity,
                sale_date,
                total_amount_paise: product.price().multiply_quantity(item.quantity).paise(),
            });
        }

        let mut batch = WriteBatch::new();
        for product in &working {
            batch.update(collections::PRODUCTS, &product.id, encode(product)?);
        }
        for sale in &sales {
            SaleLedger::stage_append(&mut batch, sale)?;
        }
        debug!(lines = %sales.len(), ops = %batch.len(), "committing bulk sale");
        self.store.commit(batch).await?;

        info!(
            customer = %customer_name,
            lines = %sales.len(),
            "bulk sale recorded"
        );

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
