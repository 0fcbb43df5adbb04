//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure (missing doc, rejected batch, bad JSON)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError::Transaction (in vetstock-engine)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller distinguishes "bad input" from "persistence failed"            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found in a collection.
    ///
    /// ## When This Occurs
    /// - `update` targets an id that was never written
    /// - A batch contains an update against a missing document
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Atomic batch commit was rejected by the backend.
    ///
    /// ## When This Occurs
    /// - An update in the batch targets a missing document
    /// - The backend refuses the write (quota, connectivity, precondition)
    ///
    /// Callers must treat the batch as fully rolled back.
    #[error("write batch rejected: {reason}")]
    TransactionFailed { reason: String },

    /// Document payload could not be encoded or decoded.
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal store error.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given collection and document id.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a TransactionFailed error.
    pub fn transaction_failed(reason: impl Into<String>) -> Self {
        StoreError::TransactionFailed {
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("products", "prod_missing");
        assert_eq!(err.to_string(), "document not found: products/prod_missing");

        let err = StoreError::transaction_failed("backend unavailable");
        assert_eq!(err.to_string(), "write batch rejected: backend unavailable");
    }
}
