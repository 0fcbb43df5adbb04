//! Typed encode/decode helpers at the document boundary.
//!
//! Documents travel as JSON values; these helpers map serde failures into
//! the storage arm of the error taxonomy so callers see them as persistence
//! faults, not input faults.

use serde::de::DeserializeOwned;
use serde::Serialize;

use vetstock_store::{Document, StoreError};

use crate::error::{EngineError, EngineResult};

/// Collection names, shared by every component that touches the store.
pub mod collections {
    /// Product batch records.
    pub const PRODUCTS: &str = "products";
    /// The append-only sale ledger.
    pub const SALES: &str = "sales";
    /// The customer directory.
    pub const CUSTOMERS: &str = "customers";
}

/// Encodes a domain value into a store document.
pub(crate) fn encode<T: Serialize>(value: &T) -> EngineResult<Document> {
    serde_json::to_value(value)
        .map_err(|e| EngineError::Transaction(StoreError::Serialization(e)))
}

/// Decodes a store document into a domain value.
pub(crate) fn decode<T: DeserializeOwned>(document: Document) -> EngineResult<T> {
    serde_json::from_value(document)
        .map_err(|e| EngineError::Transaction(StoreError::Serialization(e)))
}
