//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── ValidationError  - Product field rule violations                  │
//! │  └── RecordError      - Stored payload that cannot be decoded          │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── RepoError        - What repository callers see                    │
//! │                                                                         │
//! │  Flow: ValidationError → RepoError::InvalidArgument                    │
//! │        RecordError     → RepoError::CorruptRecord                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a product reaches the store. Each variant names the
/// offending field so the caller can correct it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field } | ValidationError::MustBeNonNegative { field } => {
                field
            }
        }
    }
}

// =============================================================================
// Record Error
// =============================================================================

/// A stored field map that does not describe a product.
///
/// ## When This Occurs
/// - Another writer stored the element with a different schema
/// - A key was removed or renamed by hand
/// - A numeric field holds text that does not parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required key is absent.
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// A key is present but its value does not parse.
    #[error("field '{field}' has invalid value '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
