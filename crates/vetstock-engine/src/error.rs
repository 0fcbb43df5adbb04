//! # Engine Error Types
//!
//! The caller-facing error taxonomy for every engine operation.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EngineError                                     │
//! │                                                                         │
//! │  Validation        - malformed/out-of-range input, caught BEFORE       │
//! │                      any mutation                                       │
//! │  NotFound          - reference to a nonexistent product/customer       │
//! │  InsufficientStock - carries requested vs. available for user          │
//! │                      messaging ("Not enough stock. Only N available.") │
//! │  Transaction       - atomic commit failed at the storage boundary;     │
//! │                      caller must treat it as fully rolled back         │
//! │                                                                         │
//! │  The split lets callers distinguish "your input was invalid" from      │
//! │  "the system failed to persist a valid operation".                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use vetstock_core::ValidationError;
use vetstock_store::StoreError;

/// Errors raised by catalog, reconciliation, ledger, and directory
/// operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input validation failed. Raised before any mutation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A sale asked for more units than the batch holds.
    ///
    /// ## User Workflow
    /// ```text
    /// Record sale (qty: 10)
    ///      │
    ///      ▼
    /// Batch RABVAC25A has stock_in_hand = 5
    ///      │
    ///      ▼
    /// InsufficientStock { requested: 10, available: 5, ... }
    ///      │
    ///      ▼
    /// Form shows: "Not enough stock. Only 5 available."
    /// ```
    #[error("Not enough stock. Only {available} available.")]
    InsufficientStock {
        product_name: String,
        batch_number: String,
        requested: i64,
        available: i64,
    },

    /// The atomic commit failed at the storage boundary.
    ///
    /// The input was valid; persistence was not. Nothing was applied.
    #[error("transaction failed: {0}")]
    Transaction(#[from] StoreError),
}

impl EngineError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
