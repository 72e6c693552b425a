//! # Repository Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (stockroom-core) ──────► RepoError::InvalidArgument   │
//! │                                                                         │
//! │  StoreFailure::Connectivity ────────────► RepoError::StoreUnavailable  │
//! │  StoreFailure::Other ───────────────────► RepoError::RepositoryFailure │
//! │                                                                         │
//! │  collection_exists == false ────────────► RepoError::CollectionNotFound│
//! │  element_exists == false ───────────────► RepoError::ProductNotFound   │
//! │                                                                         │
//! │  RecordError (stockroom-core) ──────────► RepoError::CorruptRecord     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is retried or compensated: the first error ends the operation.

use stockroom_core::{RecordError, ValidationError};
use thiserror::Error;

use crate::store::StoreFailure;

/// Repository operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// The product violates a field rule.
    ///
    /// ## When This Occurs
    /// - Blank name or category
    /// - Negative unit price or stock level
    ///
    /// Raised before the store is contacted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The store was reached but a call failed.
    #[error("Repository failure: {0}")]
    RepositoryFailure(String),

    /// The collection has not been created yet.
    ///
    /// ## When This Occurs
    /// - `get`, `update` or `remove` before the first `add`
    #[error("Collection not found: {collection}")]
    CollectionNotFound { collection: String },

    /// No product is stored under the id.
    #[error("Product not found: {id}")]
    ProductNotFound { id: i64 },

    /// The stored fields do not decode into a product.
    #[error("Corrupt record {id} in {collection}: {source}")]
    CorruptRecord {
        collection: String,
        id: i64,
        #[source]
        source: RecordError,
    },
}

impl RepoError {
    /// Creates a CollectionNotFound error.
    pub fn collection_not_found(collection: impl Into<String>) -> Self {
        RepoError::CollectionNotFound {
            collection: collection.into(),
        }
    }

    /// Creates a ProductNotFound error.
    pub fn product_not_found(id: i64) -> Self {
        RepoError::ProductNotFound { id }
    }
}

/// Translate a store outcome into a repository error.
///
/// ## Error Mapping
/// ```text
/// StoreFailure::Connectivity → RepoError::StoreUnavailable
/// StoreFailure::Other        → RepoError::RepositoryFailure
/// ```
impl From<StoreFailure> for RepoError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connectivity(message) => RepoError::StoreUnavailable(message),
            StoreFailure::Other(message) => RepoError::RepositoryFailure(message),
        }
    }
}

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_mapping() {
        assert_eq!(
            RepoError::from(StoreFailure::connectivity("refused")),
            RepoError::StoreUnavailable("refused".to_string())
        );
        assert_eq!(
            RepoError::from(StoreFailure::other("WRONGTYPE")),
            RepoError::RepositoryFailure("WRONGTYPE".to_string())
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RepoError::collection_not_found("products").to_string(),
            "Collection not found: products"
        );
        assert_eq!(
            RepoError::product_not_found(7).to_string(),
            "Product not found: 7"
        );

        let err: RepoError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid argument: name is required");
    }
}
