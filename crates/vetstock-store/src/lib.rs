//! # vetstock-store: Document Store Boundary for Vetstock
//!
//! This crate defines the storage contract the reconciliation engine relies
//! on, plus an in-memory implementation for tests and single-process use.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vetstock Data Flow                               │
//! │                                                                         │
//! │  Engine operation (record_sale, receive_stock, ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vetstock-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ DocumentStore │    │  WriteBatch   │    │  MemoryStore │  │   │
//! │  │   │   (trait)     │    │  (atomic unit)│    │  (in-memory) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get/set/      │◄───│ Set / Update  │    │ BTreeMap per │  │   │
//! │  │   │ update/list/  │    │ ops, applied  │    │ collection,  │  │   │
//! │  │   │ commit/       │    │ all-or-none   │    │ broadcast    │  │   │
//! │  │   │ subscribe     │    │               │    │ events       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  External transactional document store (backend adapters out of scope) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - The `DocumentStore` trait, `WriteBatch`, `StoreEvent`
//! - [`memory`] - In-memory implementation
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vetstock_store::{DocumentStore, MemoryStore, WriteBatch};
//!
//! let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
//!
//! let mut batch = WriteBatch::new();
//! batch.update("products", product_id, product_doc);
//! batch.set("sales", sale_id, sale_doc);
//! store.commit(batch).await?; // all-or-nothing
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{Document, DocumentStore, StoreEvent, WriteBatch, WriteOp};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
