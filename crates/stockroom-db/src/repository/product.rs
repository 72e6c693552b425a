//! # Product Repository
//!
//! Store operations for products.
//!
//! ## Call Sequences
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What each operation asks the store                   │
//! │                                                                         │
//! │  add(product)                                                           │
//! │    validate ─► collection_exists ─┬─► generate_id ─► insert_element    │
//! │                                   └─► create_collection (if absent) ─┘ │
//! │                                                                         │
//! │  get(id)                                                                │
//! │    collection_exists ─► element_exists ─► get_element ─► decode        │
//! │                                                                         │
//! │  update(product)                                                        │
//! │    validate ─► collection_exists ─► element_exists ─► update_element   │
//! │                                                                         │
//! │  remove(id)                                                             │
//! │    collection_exists ─► element_exists ─► delete_element               │
//! │                                                                         │
//! │  Any failed call ends the operation; nothing already done is undone.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The existence checks and the following write are separate store calls,
//! so two callers racing on the same id can both pass a check. Backends that
//! need stronger guarantees make the write itself conditional (see
//! `RedisStore`).

use std::sync::Arc;

use stockroom_core::validation::validate_product;
use stockroom_core::{Product, ProductRecord};
use tracing::{debug, info, warn};

use crate::error::{RepoError, RepoResult};
use crate::store::Store;

/// Repository for products kept in one store collection.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(store, "products");
///
/// let id = repo.add(&tea).await?;
/// let product = repo.get(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Arc<dyn Store>,
    collection: String,
}

impl ProductRepository {
    /// Creates a new ProductRepository over `collection`.
    pub fn new(store: Arc<dyn Store>, collection: impl Into<String>) -> Self {
        ProductRepository {
            store,
            collection: collection.into(),
        }
    }

    /// Returns the collection this repository reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Adds a product and returns the id the store assigned to it.
    ///
    /// The product's own `id` is ignored. The collection is created on first
    /// use and stays created even if a later step fails.
    ///
    /// ## Returns
    /// * `Ok(id)` - Product stored under `id`
    /// * `Err(RepoError::InvalidArgument)` - Field rule violated, store untouched
    /// * `Err(RepoError::StoreUnavailable)` - Store unreachable
    /// * `Err(RepoError::RepositoryFailure)` - Any other store failure
    pub async fn add(&self, product: &Product) -> RepoResult<i64> {
        validate_product(product)?;

        debug!(collection = %self.collection, name = %product.name, "Adding product");

        if !self.store.collection_exists(&self.collection).await? {
            self.store.create_collection(&self.collection).await?;
            info!(collection = %self.collection, "Created collection");
        }

        let id = self.store.generate_id(&self.collection).await?;

        let fields = ProductRecord::from_product(product).to_fields();
        self.store
            .insert_element(&self.collection, id, fields)
            .await?;

        info!(collection = %self.collection, id, "Product added");
        Ok(id)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found, `id` set
    /// * `Err(RepoError::CollectionNotFound)` - Nothing was ever added
    /// * `Err(RepoError::ProductNotFound)` - No element under `id`
    /// * `Err(RepoError::CorruptRecord)` - Stored fields do not decode
    pub async fn get(&self, id: i64) -> RepoResult<Product> {
        debug!(collection = %self.collection, id, "Getting product");

        self.ensure_exists(id).await?;

        let fields = self.store.get_element(&self.collection, id).await?;
        let record = ProductRecord::from_fields(&fields).map_err(|source| {
            warn!(collection = %self.collection, id, error = %source, "Corrupt product record");
            RepoError::CorruptRecord {
                collection: self.collection.clone(),
                id,
                source,
            }
        })?;

        Ok(record.into_product(id))
    }

    /// Replaces the stored fields of `product.id`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(RepoError::InvalidArgument)` - Field rule violated, store untouched
    /// * `Err(RepoError::CollectionNotFound)` - Nothing was ever added
    /// * `Err(RepoError::ProductNotFound)` - No element under `product.id`
    pub async fn update(&self, product: &Product) -> RepoResult<()> {
        validate_product(product)?;

        debug!(collection = %self.collection, id = product.id, "Updating product");

        self.ensure_exists(product.id).await?;

        let fields = ProductRecord::from_product(product).to_fields();
        self.store
            .update_element(&self.collection, product.id, fields)
            .await?;

        Ok(())
    }

    /// Removes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Product removed
    /// * `Err(RepoError::CollectionNotFound)` - Nothing was ever added
    /// * `Err(RepoError::ProductNotFound)` - No element under `id`
    pub async fn remove(&self, id: i64) -> RepoResult<()> {
        debug!(collection = %self.collection, id, "Removing product");

        self.ensure_exists(id).await?;
        self.store.delete_element(&self.collection, id).await?;

        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> RepoResult<()> {
        if !self.store.collection_exists(&self.collection).await? {
            return Err(RepoError::collection_not_found(&self.collection));
        }

        if !self.store.element_exists(&self.collection, id).await? {
            return Err(RepoError::product_not_found(id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
