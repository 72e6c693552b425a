//! # Store Module
//!
//! The capability contract the repository consumes, plus the backends that
//! implement it.
//!
//! ## Outcome Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every store call returns                             │
//! │                                                                         │
//! │  StoreResult<T> = Result<T, StoreFailure>                              │
//! │                                                                         │
//! │   Ok(T)                          ← success, carries the output value   │
//! │   Err(StoreFailure::Connectivity) ← store could not be reached         │
//! │   Err(StoreFailure::Other)        ← reached, but the call failed       │
//! │                                                                         │
//! │  The repository maps these 1:1 onto                                    │
//! │   proceed / RepoError::StoreUnavailable / RepoError::RepositoryFailure │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Backends
//!
//! - [`memory::MemoryStore`] - In-process collections (tests, seeding, embedding)
//! - [`redis_store::RedisStore`] - Redis hashes, one per element

use std::fmt;

use async_trait::async_trait;
use stockroom_core::Fields;
use thiserror::Error;

pub mod memory;
pub mod redis_store;

// =============================================================================
// Outcome
// =============================================================================

/// Why a store call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFailure {
    /// The store could not be reached (refused, dropped, timed out).
    #[error("store unreachable: {0}")]
    Connectivity(String),

    /// The store answered but the operation failed.
    #[error("store operation failed: {0}")]
    Other(String),
}

impl StoreFailure {
    /// Creates a connectivity failure.
    pub fn connectivity(message: impl Into<String>) -> Self {
        StoreFailure::Connectivity(message.into())
    }

    /// Creates a non-connectivity failure.
    pub fn other(message: impl Into<String>) -> Self {
        StoreFailure::Other(message.into())
    }

    /// Returns true for connectivity-class failures.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, StoreFailure::Connectivity(_))
    }
}

/// Result type for store calls.
pub type StoreResult<T> = Result<T, StoreFailure>;

// =============================================================================
// Operations
// =============================================================================

/// The kinds of call a store accepts.
///
/// Used by [`memory::MemoryStore`] to record calls and to arm failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CollectionExists,
    CreateCollection,
    GenerateId,
    ElementExists,
    InsertElement,
    GetElement,
    UpdateElement,
    DeleteElement,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::CollectionExists => "collection_exists",
            StoreOp::CreateCollection => "create_collection",
            StoreOp::GenerateId => "generate_id",
            StoreOp::ElementExists => "element_exists",
            StoreOp::InsertElement => "insert_element",
            StoreOp::GetElement => "get_element",
            StoreOp::UpdateElement => "update_element",
            StoreOp::DeleteElement => "delete_element",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Capability Trait
// =============================================================================

/// An asynchronous, schema-less collection store.
///
/// Collections are named containers of string-keyed field maps addressed by
/// integer id. Implementations own durability, concurrency and identifier
/// uniqueness; callers own the meaning of the fields.
///
/// ## Contract
/// - `create_collection` is create-if-absent: creating an existing
///   collection succeeds.
/// - `generate_id` never returns an id already handed out for that
///   collection.
/// - `insert_element` fails if the id is taken; `get_element`,
///   `update_element` and `delete_element` fail if it is not.
#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// Checks whether a collection exists.
    async fn collection_exists(&self, collection: &str) -> StoreResult<bool>;

    /// Creates a collection if it does not exist yet.
    async fn create_collection(&self, collection: &str) -> StoreResult<()>;

    /// Reserves a fresh element id in a collection.
    async fn generate_id(&self, collection: &str) -> StoreResult<i64>;

    /// Checks whether an element exists.
    async fn element_exists(&self, collection: &str, id: i64) -> StoreResult<bool>;

    /// Stores a new element.
    async fn insert_element(&self, collection: &str, id: i64, fields: Fields)
        -> StoreResult<()>;

    /// Loads an element's fields.
    async fn get_element(&self, collection: &str, id: i64) -> StoreResult<Fields>;

    /// Replaces an existing element's fields.
    async fn update_element(&self, collection: &str, id: i64, fields: Fields)
        -> StoreResult<()>;

    /// Removes an element.
    async fn delete_element(&self, collection: &str, id: i64) -> StoreResult<()>;
}

// =============================================================================
// Unit Tests
// =============================================================================
