//! # vetstock-engine: Inventory and Sales Engine for Vetstock
//!
//! Composes the pure rules from `vetstock-core` with the storage boundary
//! from `vetstock-store` into the operations a pet-shop front end calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       vetstock-engine                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ ProductCatalog│ │Reconciliation│  │  SaleLedger  │                  │
//! │  │ register,    │  │   Engine     │  │  queries     │                  │
//! │  │ receive,     │  │ record_sale, │  │ (append is   │                  │
//! │  │ queries      │  │ record_bulk_ │  │  engine-     │                  │
//! │  │              │  │ sale         │  │  internal)   │                  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘                  │
//! │         │                 │                 │                           │
//! │  ┌──────┴───────┐  ┌──────┴───────┐  ┌──────┴───────┐                  │
//! │  │  Dashboard   │  │  Customer    │  │ Notification │                  │
//! │  │  aggregates  │  │  Directory   │  │ text seam    │                  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────┘                  │
//! │         │                 │                                             │
//! │         ▼                 ▼                                             │
//! │              Arc<dyn DocumentStore>  (vetstock-store)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Product batch registration, receipts, queries
//! - [`reconcile`] - Sale recording with atomic stock reconciliation
//! - [`ledger`] - Sale ledger queries
//! - [`dashboard`] - Derived revenue/stock figures
//! - [`directory`] - Customer records
//! - [`notify`] - Notification text service seam
//! - [`seed`] - Sample-shop bootstrap
//! - [`error`] - The caller-facing error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vetstock_engine::Vetstock;
//! use vetstock_store::MemoryStore;
//!
//! let shop = Vetstock::new(Arc::new(MemoryStore::new()));
//! vetstock_engine::seed::seed_database(shop.store()).await?;
//!
//! let sale = shop
//!     .reconciliation()
//!     .record_sale(&product_id, "Ravi Kumar", 2, today)
//!     .await?;
//! let revenue = shop.dashboard().revenue_for_day(today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod codec;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod reconcile;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{NewProduct, ProductCatalog};
pub use dashboard::{Dashboard, TopSeller};
pub use directory::{CustomerDirectory, NewCustomer};
pub use error::{EngineError, EngineResult};
pub use ledger::SaleLedger;
pub use notify::{
    NotificationMessage, NotificationRequest, NotificationService, NotifyError, SaleLineSummary,
    TemplateNotifier,
};
pub use reconcile::{BulkSaleItem, ReconciliationEngine};

use std::sync::Arc;

use vetstock_store::DocumentStore;

// =============================================================================
// Facade
// =============================================================================

/// One handle over every engine component, sharing a single store.
///
/// Front ends hold one of these instead of wiring five components by hand.
#[derive(Clone)]
pub struct Vetstock {
    store: Arc<dyn DocumentStore>,
    catalog: ProductCatalog,
    reconciliation: ReconciliationEngine,
    ledger: SaleLedger,
    dashboard: Dashboard,
    directory: CustomerDirectory,
}

impl Vetstock {
    /// Wires every component over one shared document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Vetstock {
            catalog: ProductCatalog::new(store.clone()),
            reconciliation: ReconciliationEngine::new(store.clone()),
            ledger: SaleLedger::new(store.clone()),
            dashboard: Dashboard::new(store.clone()),
            directory: CustomerDirectory::new(store.clone()),
            store,
        }
    }

    /// The shared store handle, for seeding and event subscriptions.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn reconciliation(&self) -> &ReconciliationEngine {
        &self.reconciliation
    }

    pub fn ledger(&self) -> &SaleLedger {
        &self.ledger
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }
}
