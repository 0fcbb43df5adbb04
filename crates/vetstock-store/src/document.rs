//! # Store Contract
//!
//! The `DocumentStore` trait and the write-batch types that travel through it.
//!
//! ## The Four Primitives
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Store Contract                              │
//! │                                                                         │
//! │  1. get(collection, id)        → per-document read                     │
//! │  2. set / update(collection, id, doc) → per-document write             │
//! │  3. subscribe(collection)      → push notification of changes          │
//! │  4. commit(WriteBatch)         → atomic multi-document write           │
//! │                                                                         │
//! │  The reconciliation engine depends on these four primitives and        │
//! │  NOTHING else about the backend. Swapping the backend means            │
//! │  implementing this trait, not touching the engine.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity Contract
//! `commit` is all-or-nothing: either every operation in the batch is
//! applied, or none are. Implementations must re-check `Update`
//! preconditions (document exists) at commit time and reject the whole
//! batch on failure. There is no partial application, ever.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::StoreResult;

// =============================================================================
// Documents
// =============================================================================

/// A stored document. Payloads are schemaless JSON; typed layers above the
/// store encode/decode with serde.
pub type Document = Value;

// =============================================================================
// Write Batch
// =============================================================================

/// A single operation inside a write batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document.
    Set {
        collection: String,
        id: String,
        document: Document,
    },
    /// Replace an existing document. Fails the whole batch if the document
    /// does not exist at commit time.
    Update {
        collection: String,
        id: String,
        document: Document,
    },
}

impl WriteOp {
    /// The collection this operation touches.
    pub fn collection(&self) -> &str {
        match self {
            WriteOp::Set { collection, .. } | WriteOp::Update { collection, .. } => collection,
        }
    }

    /// The document id this operation touches.
    pub fn id(&self) -> &str {
        match self {
            WriteOp::Set { id, .. } | WriteOp::Update { id, .. } => id,
        }
    }
}

/// An ordered set of writes applied as one atomic unit.
///
/// ## Usage
/// ```rust
/// use vetstock_store::WriteBatch;
/// use serde_json::json;
///
/// let mut batch = WriteBatch::new();
/// batch.update("products", "prod_a", json!({"stockInHand": 7}));
/// batch.set("sales", "sale_1", json!({"quantity": 3}));
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        WriteBatch { ops: Vec::new() }
    }

    /// Queues a create-or-replace write.
    pub fn set(&mut self, collection: impl Into<String>, id: impl Into<String>, document: Document) {
        self.ops.push(WriteOp::Set {
            collection: collection.into(),
            id: id.into(),
            document,
        });
    }

    /// Queues a replace-existing write.
    pub fn update(
        &mut self,
        collection: impl Into<String>,
        id: impl Into<String>,
        document: Document,
    ) {
        self.ops.push(WriteOp::Update {
            collection: collection.into(),
            id: id.into(),
            document,
        });
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the batch has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The queued operations, in application order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consumes the batch and returns its operations.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

// =============================================================================
// Change Notifications
// =============================================================================

/// A change pushed to collection subscribers after a successful write.
///
/// Subscribers receive the id of the changed document and re-read what they
/// need; events deliberately carry no payload so slow subscribers can only
/// lag, never hold stale data as truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Collection the change happened in.
    pub collection: String,
    /// Id of the written document.
    pub id: String,
}

// =============================================================================
// The Store Trait
// =============================================================================

/// The storage boundary: per-document get/set/update, collection listing,
/// collection subscription, and atomic multi-document write batches.
///
/// Injected as `Arc<dyn DocumentStore>` so the engine is testable against
/// the in-memory store without a live backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a single document. `Ok(None)` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Creates or replaces a single document.
    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Replaces an existing document. Fails with `StoreError::NotFound` if
    /// the document was never written.
    async fn update(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Lists every document in a collection, in stable id order.
    ///
    /// Reads may observe a snapshot that lags recent commits; callers must
    /// tolerate eventual consistency between a write and its visibility.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Applies a write batch atomically: every operation commits or none do.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;

    /// Subscribes to changes in a collection.
    ///
    /// Delivery is push-based: each committed write publishes one event per
    /// touched document to that collection's channel.
    fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreEvent>;
}
