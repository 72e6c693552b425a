//! # Validation Module
//!
//! Field rules a product must satisfy before it is written to a store.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductRepository::add / update                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_product() ← THIS MODULE                                      │
//! │       │                                                                 │
//! │       ├── blank name?       → Required { field: "name" }               │
//! │       ├── blank category?   → Required { field: "category" }           │
//! │       ├── unit_price < 0?   → MustBeNonNegative { "unit_price" }       │
//! │       ├── units_in_stock<0? → MustBeNonNegative { "units_in_stock" }   │
//! │       │                                                                 │
//! │       └── OK → first store call                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_product_name, validate_units_in_stock};
//!
//! assert!(validate_product_name("Chai").is_ok());
//! assert!(validate_units_in_stock(-1).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must contain at least one non-whitespace character
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_text("name", name)
}

/// Validates a product category.
///
/// ## Rules
/// - Must contain at least one non-whitespace character
pub fn validate_category(category: &str) -> ValidationResult<()> {
    require_text("category", category)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use stockroom_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Decimal::new(250, 2)).is_ok());
/// assert!(validate_unit_price(Decimal::ZERO).is_ok());
/// assert!(validate_unit_price(Decimal::new(-1, 2)).is_err());
/// ```
pub fn validate_unit_price(price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_units_in_stock(units: i32) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "units_in_stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validator
// =============================================================================

/// Validates every rule for a product, in field order.
///
/// The first violation wins; the identifier is not checked here because
/// `add` ignores it and `update` verifies it against the store.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_unit_price(product.unit_price)?;
    validate_units_in_stock(product.units_in_stock)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
