//! # Catalog Handle
//!
//! A connected store paired with the collection products live in.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::load()          ← env: backend, url, prefix, collection  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::connect(config)     ← builds MemoryStore or RedisStore       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.products()           ← cheap: clones an Arc and a name        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository::add / get / update / remove                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use crate::config::{Backend, StoreConfig};
use crate::repository::product::ProductRepository;
use crate::store::memory::MemoryStore;
use crate::store::redis_store::RedisStore;
use crate::store::{Store, StoreFailure, StoreResult};

/// Main store handle providing repository access.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<dyn Store>,
    collection: String,
}

impl Catalog {
    /// Connects the backend named by `config`.
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - Ready-to-use handle
    /// * `Err(StoreFailure::Connectivity)` - Redis unreachable
    /// * `Err(StoreFailure::Other)` - Missing or malformed Redis URL
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            backend = %config.backend,
            collection = %config.collection,
            "Initializing store"
        );

        let store: Arc<dyn Store> = match config.backend {
            Backend::Memory => Arc::new(MemoryStore::new()),
            Backend::Redis => {
                let url = config
                    .redis_url
                    .as_deref()
                    .ok_or_else(|| StoreFailure::other("redis backend requires a URL"))?;
                Arc::new(RedisStore::connect(url, config.key_prefix.clone()).await?)
            }
        };

        Ok(Catalog::from_store(store, config.collection))
    }

    /// Wraps an already constructed store.
    pub fn from_store(store: Arc<dyn Store>, collection: impl Into<String>) -> Self {
        Catalog {
            store,
            collection: collection.into(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Returns the product collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone(), self.collection.clone())
    }

    /// Checks if the store answers a read.
    ///
    /// ## Returns
    /// * `true` - Store is responsive
    /// * `false` - Store is unavailable
    pub async fn health_check(&self) -> bool {
        self.store.collection_exists(&self.collection).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOp;
    use rust_decimal_macros::dec;
    use stockroom_core::Product;

    #[tokio::test]
    async fn test_memory_catalog() {
        let catalog = Catalog::connect(StoreConfig::memory().collection("catalog"))
            .await
            .unwrap();

        assert!(catalog.health_check().await);
        assert_eq!(catalog.collection(), "catalog");

        let chai = Product::new("Chai", "Beverages", dec!(18), 39);
        let id = catalog.products().add(&chai).await.unwrap();
        assert_eq!(catalog.products().get(id).await.unwrap(), chai.with_id(id));
        assert_eq!(catalog.products().collection(), "catalog");
    }

    #[tokio::test]
    async fn test_redis_without_url() {
        let mut config = StoreConfig::redis("redis://localhost");
        config.redis_url = None;

        let err = Catalog::connect(config).await.unwrap_err();
        assert!(!err.is_connectivity());
    }

    #[tokio::test]
    async fn test_health_check_reports_unreachable_store() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::from_store(store.clone(), "products");

        store
            .fail_on(StoreOp::CollectionExists, StoreFailure::connectivity("down"))
            .await;
        assert!(!catalog.health_check().await);
        assert!(catalog.health_check().await);
    }
}
