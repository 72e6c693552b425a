//! # Domain Types
//!
//! The `Product` entity managed by the repository.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────┐
//! │              Product                │
//! │  ─────────────────────────────────  │
//! │  id              (i64, store-owned) │
//! │  name            (non-blank)        │
//! │  category        (non-blank)        │
//! │  unit_price      (Decimal ≥ 0)      │
//! │  units_in_stock  (i32 ≥ 0)          │
//! │  discontinued    (bool)             │
//! └─────────────────────────────────────┘
//! ```
//!
//! The `id` is assigned by the store when the product is added and never
//! changes afterwards. It is not part of the persisted field map; the
//! element key carries it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product kept in a stock collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier. Zero until the product has been added.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Category the product is listed under.
    pub category: String,

    /// Price of a single unit.
    pub unit_price: Decimal,

    /// Units currently on hand.
    pub units_in_stock: i32,

    /// Whether the product is no longer sold.
    pub discontinued: bool,
}

impl Product {
    /// Creates an unsaved, active product.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use stockroom_core::Product;
    ///
    /// let tea = Product::new("Tea", "Beverages", Decimal::new(250, 2), 100);
    /// assert_eq!(tea.id, 0);
    /// assert!(!tea.discontinued);
    /// ```
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
        units_in_stock: i32,
    ) -> Self {
        Product {
            id: 0,
            name: name.into(),
            category: category.into(),
            unit_price,
            units_in_stock,
            discontinued: false,
        }
    }

    /// Returns the product with its identifier set.
    #[inline]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Returns the product with its discontinued flag set.
    #[inline]
    pub fn discontinued(mut self, discontinued: bool) -> Self {
        self.discontinued = discontinued;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
