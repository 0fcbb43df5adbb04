//! # In-Memory Document Store
//!
//! A fully in-process implementation of [`DocumentStore`].
//!
//! ## Where This Is Used
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MemoryStore Roles                                    │
//! │                                                                         │
//! │  1. TESTS: every engine test runs against MemoryStore, so the          │
//! │     reconciliation rules are exercised without a live backend.         │
//! │                                                                         │
//! │  2. SINGLE-PROCESS DEPLOYMENTS: a demo or kiosk build can run          │
//! │     entirely in memory, seeded at startup.                             │
//! │                                                                         │
//! │  The engine cannot tell the difference - that is the point of the      │
//! │  DocumentStore seam.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Semantics
//! `commit` validates every `Update` precondition under the write lock
//! before applying anything, so a batch with a stale reference is rejected
//! in full. Change events are published only after the whole batch has
//! been applied.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::document::{Document, DocumentStore, StoreEvent, WriteBatch, WriteOp};
use crate::error::{StoreError, StoreResult};

/// Buffered events per collection channel. Slow subscribers that fall more
/// than this far behind see a `Lagged` error and re-read the collection.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// In-memory document store backed by per-collection ordered maps.
///
/// ## Usage
/// ```rust,ignore
/// let store = MemoryStore::new();
/// store.set("products", "prod_a", json!({"name": "Grooming Brush"})).await?;
/// let doc = store.get("products", "prod_a").await?;
/// assert!(doc.is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// collection name → (document id → document), id-ordered.
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    /// Per-collection change channels, created lazily on first subscribe.
    channels: Mutex<HashMap<String, broadcast::Sender<StoreEvent>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Publishes a change event to subscribers of `collection`, if any.
    fn notify(&self, collection: &str, id: &str) {
        let channels = self.channels.lock().expect("channel registry poisoned");
        if let Some(sender) = channels.get(collection) {
            // Send fails only when there are no live receivers; that's fine.
            let _ = sender.send(StoreEvent {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        {
            let mut collections = self.collections.write().expect("store lock poisoned");
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), document);
        }

        debug!(collection = %collection, id = %id, "document set");
        self.notify(collection, id);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        {
            let mut collections = self.collections.write().expect("store lock poisoned");
            let docs = collections
                .get_mut(collection)
                .ok_or_else(|| StoreError::not_found(collection, id))?;

            let slot = docs
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            *slot = document;
        }

        debug!(collection = %collection, id = %id, "document updated");
        self.notify(collection, id);
        Ok(())
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let ops = batch.into_ops();
        let mut touched: Vec<(String, String)> = Vec::with_capacity(ops.len());

        {
            let mut collections = self.collections.write().expect("store lock poisoned");

            // Precondition pass: every Update must target a document that
            // exists, either already stored or created earlier in this batch.
            let mut created_in_batch: Vec<(&str, &str)> = Vec::new();
            for op in &ops {
                match op {
                    WriteOp::Set { collection, id, .. } => {
                        created_in_batch.push((collection, id));
                    }
                    WriteOp::Update { collection, id, .. } => {
                        let exists = collections
                            .get(collection.as_str())
                            .map(|docs| docs.contains_key(id.as_str()))
                            .unwrap_or(false)
                            || created_in_batch.contains(&(collection.as_str(), id.as_str()));
                        if !exists {
                            warn!(collection = %collection, id = %id, "batch rejected: update target missing");
                            return Err(StoreError::transaction_failed(format!(
                                "update target missing: {}/{}",
                                collection, id
                            )));
                        }
                    }
                }
            }

            // Apply pass: preconditions held, so nothing below can fail.
            for op in ops {
                match op {
                    WriteOp::Set {
                        collection,
                        id,
                        document,
                    }
                    | WriteOp::Update {
                        collection,
                        id,
                        document,
                    } => {
                        collections
                            .entry(collection.clone())
                            .or_default()
                            .insert(id.clone(), document);
                        touched.push((collection, id));
                    }
                }
            }
        }

        debug!(writes = touched.len(), "batch committed");
        for (collection, id) in touched {
            self.notify(&collection, &id);
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str) -> broadcast::Receiver<StoreEvent> {
        let mut channels = self.channels.lock().expect("channel registry poisoned");
        channels
            .entry(collection.to_string())
            .or_insert_with(|| broadcast::channel(EVENT_CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_set_roundtrip() {
        let store = MemoryStore::new();

        assert!(store.get("products", "prod_a").await.unwrap().is_none());

        store
            .set("products", "prod_a", json!({"name": "Nail Clippers"}))
            .await
            .unwrap();

        let doc = store.get("products", "prod_a").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Nail Clippers");
    }

    #[tokio::test]
    async fn test_update_requires_existing_document() {
        let store = MemoryStore::new();

        let err = store
            .update("products", "prod_missing", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        store.set("products", "prod_a", json!({"v": 1})).await.unwrap();
        store.update("products", "prod_a", json!({"v": 2})).await.unwrap();

        let doc = store.get("products", "prod_a").await.unwrap().unwrap();
        assert_eq!(doc["v"], 2);
    }

    #[tokio::test]
    async fn test_list_is_id_ordered() {
        let store = MemoryStore::new();
        store.set("products", "b", json!({"n": "B"})).await.unwrap();
        store.set("products", "a", json!({"n": "A"})).await.unwrap();
        store.set("products", "c", json!({"n": "C"})).await.unwrap();

        let docs = store.list("products").await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d["n"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_commit_applies_all_ops() {
        let store = MemoryStore::new();
        store.set("products", "prod_a", json!({"stockInHand": 10})).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.update("products", "prod_a", json!({"stockInHand": 7}));
        batch.set("sales", "sale_1", json!({"quantity": 3}));
        store.commit(batch).await.unwrap();

        let product = store.get("products", "prod_a").await.unwrap().unwrap();
        assert_eq!(product["stockInHand"], 7);
        let sale = store.get("sales", "sale_1").await.unwrap().unwrap();
        assert_eq!(sale["quantity"], 3);
    }

    #[tokio::test]
    async fn test_commit_is_all_or_nothing() {
        let store = MemoryStore::new();
        store.set("products", "prod_a", json!({"stockInHand": 10})).await.unwrap();

        // Second op targets a missing document, so the first must not apply.
        let mut batch = WriteBatch::new();
        batch.update("products", "prod_a", json!({"stockInHand": 7}));
        batch.update("products", "prod_missing", json!({"stockInHand": 1}));

        let err = store.commit(batch).await.unwrap_err();
        assert!(matches!(err, StoreError::TransactionFailed { .. }));

        let product = store.get("products", "prod_a").await.unwrap().unwrap();
        assert_eq!(product["stockInHand"], 10);
        assert!(store.get("sales", "sale_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_allows_update_after_set_in_same_batch() {
        let store = MemoryStore::new();

        let mut batch = WriteBatch::new();
        batch.set("sales", "sale_1", json!({"quantity": 1}));
        batch.update("sales", "sale_1", json!({"quantity": 2}));
        store.commit(batch).await.unwrap();

        let sale = store.get("sales", "sale_1").await.unwrap().unwrap();
        assert_eq!(sale["quantity"], 2);
    }

    #[tokio::test]
    async fn test_subscribe_receives_commit_events() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("products");

        let mut batch = WriteBatch::new();
        batch.set("products", "prod_a", json!({"n": 1}));
        batch.set("sales", "sale_1", json!({"n": 2}));
        store.commit(batch).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.collection, "products");
        assert_eq!(event.id, "prod_a");

        // The sales write went to a different channel.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rejected_commit_emits_no_events() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("products");

        let mut batch = WriteBatch::new();
        batch.update("products", "prod_missing", json!({}));
        assert!(store.commit(batch).await.is_err());

        assert!(rx.try_recv().is_err());
    }
}
