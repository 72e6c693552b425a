//! # In-Memory Store
//!
//! Collections kept in process memory behind a tokio `RwLock`.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryStore                                                           │
//! │  └── collections: HashMap<name, MemoryCollection>                      │
//! │        └── "products"                                                   │
//! │              ├── next_id: 3                                             │
//! │              └── elements: { 1 → Fields, 2 → Fields }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Test Instrumentation
//! A store built with [`MemoryStore::recording`] appends every call to a call
//! log; [`MemoryStore::new`] keeps no log. On either, a failure can be armed
//! for the next call of a given kind. Together these let tests assert which
//! store calls an operation made and how it reacts when any one of them fails.
//!
//! ```rust,ignore
//! let store = MemoryStore::recording();
//! store.fail_on(StoreOp::GenerateId, StoreFailure::connectivity("down")).await;
//! // next generate_id returns Err(Connectivity("down"))
//! ```

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use stockroom_core::Fields;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::{Store, StoreFailure, StoreOp, StoreResult};

/// One named collection.
#[derive(Debug, Default)]
struct MemoryCollection {
    next_id: i64,
    elements: BTreeMap<i64, Fields>,
}

/// In-process [`Store`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, MemoryCollection>>,
    calls: Option<Mutex<Vec<StoreOp>>>,
    armed: Mutex<HashMap<StoreOp, StoreFailure>>,
}

impl MemoryStore {
    /// Creates an empty store that keeps no call log.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates an empty store that records every call (see [`MemoryStore::calls`]).
    pub fn recording() -> Self {
        MemoryStore {
            calls: Some(Mutex::new(Vec::new())),
            ..MemoryStore::default()
        }
    }

    /// Makes the next call of kind `op` fail with `failure`.
    ///
    /// The failure fires once; later calls of the same kind succeed again.
    pub async fn fail_on(&self, op: StoreOp, failure: StoreFailure) {
        self.armed.lock().await.insert(op, failure);
    }

    /// Returns every call made so far, oldest first.
    ///
    /// Always empty unless the store was built with [`MemoryStore::recording`].
    pub async fn calls(&self) -> Vec<StoreOp> {
        match &self.calls {
            Some(calls) => calls.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Forgets the recorded calls.
    pub async fn clear_calls(&self) {
        if let Some(calls) = &self.calls {
            calls.lock().await.clear();
        }
    }

    /// Number of elements in a collection, `None` if it does not exist.
    pub async fn element_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.elements.len())
    }

    async fn enter(&self, op: StoreOp) -> StoreResult<()> {
        if let Some(calls) = &self.calls {
            calls.lock().await.push(op);
        }

        if let Some(failure) = self.armed.lock().await.remove(&op) {
            debug!(%op, %failure, "Armed failure fired");
            return Err(failure);
        }

        Ok(())
    }
}

fn missing_collection(collection: &str) -> StoreFailure {
    StoreFailure::other(format!("collection '{}' does not exist", collection))
}

fn missing_element(collection: &str, id: i64) -> StoreFailure {
    StoreFailure::other(format!("element {} not found in '{}'", id, collection))
}

#[async_trait]
impl Store for MemoryStore {
    async fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        self.enter(StoreOp::CollectionExists).await?;
        Ok(self.collections.read().await.contains_key(collection))
    }

    async fn create_collection(&self, collection: &str) -> StoreResult<()> {
        self.enter(StoreOp::CreateCollection).await?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn generate_id(&self, collection: &str) -> StoreResult<i64> {
        self.enter(StoreOp::GenerateId).await?;

        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        entry.next_id += 1;
        Ok(entry.next_id)
    }

    async fn element_exists(&self, collection: &str, id: i64) -> StoreResult<bool> {
        self.enter(StoreOp::ElementExists).await?;

        let collections = self.collections.read().await;
        let entry = collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?;

        Ok(entry.elements.contains_key(&id))
    }

    async fn insert_element(
        &self,
        collection: &str,
        id: i64,
        fields: Fields,
    ) -> StoreResult<()> {
        self.enter(StoreOp::InsertElement).await?;

        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        if entry.elements.contains_key(&id) {
            return Err(StoreFailure::other(format!(
                "element {} already exists in '{}'",
                id, collection
            )));
        }

        entry.elements.insert(id, fields);
        Ok(())
    }

    async fn get_element(&self, collection: &str, id: i64) -> StoreResult<Fields> {
        self.enter(StoreOp::GetElement).await?;

        let collections = self.collections.read().await;
        collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?
            .elements
            .get(&id)
            .cloned()
            .ok_or_else(|| missing_element(collection, id))
    }

    async fn update_element(
        &self,
        collection: &str,
        id: i64,
        fields: Fields,
    ) -> StoreResult<()> {
        self.enter(StoreOp::UpdateElement).await?;

        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?
            .elements
            .get_mut(&id)
            .ok_or_else(|| missing_element(collection, id))?;

        *slot = fields;
        Ok(())
    }

    async fn delete_element(&self, collection: &str, id: i64) -> StoreResult<()> {
        self.enter(StoreOp::DeleteElement).await?;

        let mut collections = self.collections.write().await;
        collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?
            .elements
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing_element(collection, id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), name.to_string());
        fields
    }

    #[tokio::test]
    async fn test_collection_lifecycle() {
        let store = MemoryStore::new();

        assert!(!store.collection_exists("products").await.unwrap());
        store.create_collection("products").await.unwrap();
        assert!(store.collection_exists("products").await.unwrap());

        // create-if-absent
        store.create_collection("products").await.unwrap();
        assert_eq!(store.element_count("products").await, Some(0));
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_collection() {
        let store = MemoryStore::new();
        store.create_collection("a").await.unwrap();
        store.create_collection("b").await.unwrap();

        assert_eq!(store.generate_id("a").await.unwrap(), 1);
        assert_eq!(store.generate_id("a").await.unwrap(), 2);
        assert_eq!(store.generate_id("b").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_generate_id_requires_collection() {
        let store = MemoryStore::new();
        let err = store.generate_id("missing").await.unwrap_err();
        assert!(!err.is_connectivity());
    }

    #[tokio::test]
    async fn test_element_crud() {
        let store = MemoryStore::new();
        store.create_collection("products").await.unwrap();

        store
            .insert_element("products", 1, fields("Chai"))
            .await
            .unwrap();
        assert!(store.element_exists("products", 1).await.unwrap());
        assert!(store
            .insert_element("products", 1, fields("Chang"))
            .await
            .is_err());

        store
            .update_element("products", 1, fields("Chang"))
            .await
            .unwrap();
        assert_eq!(
            store.get_element("products", 1).await.unwrap()["name"],
            "Chang"
        );

        store.delete_element("products", 1).await.unwrap();
        assert!(!store.element_exists("products", 1).await.unwrap());
        assert!(store.delete_element("products", 1).await.is_err());
        assert!(store.get_element("products", 1).await.is_err());
        assert!(store
            .update_element("products", 1, fields("Chai"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_armed_failure_fires_once() {
        let store = MemoryStore::new();
        store
            .fail_on(
                StoreOp::CollectionExists,
                StoreFailure::connectivity("down"),
            )
            .await;

        assert_eq!(
            store.collection_exists("products").await,
            Err(StoreFailure::connectivity("down"))
        );
        assert_eq!(store.collection_exists("products").await, Ok(false));
    }

    #[tokio::test]
    async fn test_call_log() {
        let store = MemoryStore::recording();
        store.create_collection("products").await.unwrap();
        store.generate_id("products").await.unwrap();

        assert_eq!(
            store.calls().await,
            vec![StoreOp::CreateCollection, StoreOp::GenerateId]
        );

        store.clear_calls().await;
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_default_store_keeps_no_call_log() {
        let store = MemoryStore::new();
        store.create_collection("products").await.unwrap();

        for _ in 0..1000 {
            let id = store.generate_id("products").await.unwrap();
            store
                .insert_element("products", id, fields("Chai"))
                .await
                .unwrap();
            store.get_element("products", id).await.unwrap();
            store.delete_element("products", id).await.unwrap();
        }

        assert_eq!(store.element_count("products").await, Some(0));
        assert!(store.calls().await.is_empty());
    }
}
