//! # Persisted Record
//!
//! How a product is laid out inside a schema-less collection element.
//!
//! ## Field Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Element <collection>/<id>                                             │
//! │                                                                         │
//! │   key            value                  encoding                       │
//! │   ────────────   ────────────────────   ─────────────────────────────  │
//! │   name           "Tea"                  verbatim                       │
//! │   category       "Beverages"            verbatim                       │
//! │   price          "2.50"                 invariant decimal text         │
//! │   in-stock       "100"                  invariant integer text         │
//! │   discontinued   "false"                boolean literal                │
//! │                                                                         │
//! │  The id is the element key and is never written into the map.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding is strict about the five keys and tolerant of extras, so a
//! record written by a newer client with additional fields still loads.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::RecordError;
use crate::types::Product;

/// Untyped payload of a single store element.
pub type Fields = BTreeMap<String, String>;

/// Key holding the product name.
pub const NAME_KEY: &str = "name";
/// Key holding the product category.
pub const CATEGORY_KEY: &str = "category";
/// Key holding the unit price.
pub const PRICE_KEY: &str = "price";
/// Key holding the stock level.
pub const IN_STOCK_KEY: &str = "in-stock";
/// Key holding the discontinued flag.
pub const DISCONTINUED_KEY: &str = "discontinued";

/// Typed view of a product's persisted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub in_stock: i32,
    pub discontinued: bool,
}

impl ProductRecord {
    /// Captures the persisted fields of a product (everything but the id).
    pub fn from_product(product: &Product) -> Self {
        ProductRecord {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.unit_price,
            in_stock: product.units_in_stock,
            discontinued: product.discontinued,
        }
    }

    /// Rebuilds the product stored under `id`.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            unit_price: self.price,
            units_in_stock: self.in_stock,
            discontinued: self.discontinued,
        }
    }

    /// Encodes the record as the five-key field map.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(NAME_KEY.to_string(), self.name.clone());
        fields.insert(CATEGORY_KEY.to_string(), self.category.clone());
        fields.insert(PRICE_KEY.to_string(), self.price.to_string());
        fields.insert(IN_STOCK_KEY.to_string(), self.in_stock.to_string());
        fields.insert(
            DISCONTINUED_KEY.to_string(),
            self.discontinued.to_string(),
        );
        fields
    }

    /// Decodes a field map produced by [`ProductRecord::to_fields`].
    ///
    /// ## Errors
    /// * `RecordError::MissingField` - one of the five keys is absent
    /// * `RecordError::InvalidField` - price, stock or flag does not parse
    pub fn from_fields(fields: &Fields) -> Result<Self, RecordError> {
        let name = required(fields, NAME_KEY)?.to_string();
        let category = required(fields, CATEGORY_KEY)?.to_string();

        let raw = required(fields, PRICE_KEY)?;
        let price = Decimal::from_str(raw.trim()).map_err(|e| invalid(PRICE_KEY, raw, e))?;

        let raw = required(fields, IN_STOCK_KEY)?;
        let in_stock = raw
            .trim()
            .parse::<i32>()
            .map_err(|e| invalid(IN_STOCK_KEY, raw, e))?;

        let raw = required(fields, DISCONTINUED_KEY)?;
        let discontinued = parse_flag(raw).ok_or_else(|| RecordError::InvalidField {
            field: DISCONTINUED_KEY,
            value: raw.to_string(),
            reason: "expected 'true' or 'false'".to_string(),
        })?;

        Ok(ProductRecord {
            name,
            category,
            price,
            in_stock,
            discontinued,
        })
    }
}

fn required<'a>(fields: &'a Fields, key: &'static str) -> Result<&'a str, RecordError> {
    fields
        .get(key)
        .map(String::as_str)
        .ok_or(RecordError::MissingField { field: key })
}

fn invalid(field: &'static str, value: &str, reason: impl ToString) -> RecordError {
    RecordError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

// Accepts "True"/"False" as written by clients that capitalise booleans.
fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
