//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! Everything the product repository decides without touching a store:
//! the `Product` entity, its validation rules, and the typed record that
//! describes how a product is laid out inside a schema-less collection.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐               │   │
//! │  │   │   types   │  │ validation  │  │  record   │               │   │
//! │  │   │  Product  │  │   rules     │  │  codec    │               │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockroom-db (Store Access Layer)              │   │
//! │  │          Store trait, backends, ProductRepository               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Product` entity
//! - [`validation`] - Field rules checked before any store call
//! - [`record`] - Typed persisted representation and its encode/decode pair
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use stockroom_core::{Product, ProductRecord};
//!
//! let tea = Product::new("Tea", "Beverages", Decimal::new(250, 2), 100);
//! stockroom_core::validation::validate_product(&tea).unwrap();
//!
//! let fields = ProductRecord::from_product(&tea).to_fields();
//! assert_eq!(fields["price"], "2.50");
//!
//! let back = ProductRecord::from_fields(&fields).unwrap().into_product(1);
//! assert_eq!(back, tea.with_id(1));
//! ```

pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use error::{RecordError, ValidationError};
pub use record::{Fields, ProductRecord};
pub use types::Product;

/// Collection name used when none is configured.
pub const DEFAULT_COLLECTION: &str = "products";
