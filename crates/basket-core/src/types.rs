//! # Domain Types
//!
//! Core domain types used throughout Basket.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌─────────────────┐                     │
//! │  │    Product      │  snapshot  │    LineItem     │                     │
//! │  │  ─────────────  │ ─────────► │  ─────────────  │                     │
//! │  │  id             │            │  product_id     │                     │
//! │  │  kind           │            │  price (frozen) │                     │
//! │  │  price_cents    │            │  weight (frozen)│                     │
//! │  │  weight_grams   │            │  count          │                     │
//! │  │  deleted        │            │  attributes     │                     │
//! │  │  published      │            │  added_at       │                     │
//! │  └─────────────────┘            └─────────────────┘                     │
//! │   (catalog-owned)                (cart-owned)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::weight::Weight;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id, rejecting zero and negative values.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::ProductId;
    ///
    /// assert_eq!(ProductId::new(5).unwrap().get(), 5);
    /// assert!(ProductId::new(0).is_err());
    /// assert!(ProductId::new(-3).is_err());
    /// ```
    pub fn new(raw: i64) -> ValidationResult<Self> {
        u64::try_from(raw)
            .ok()
            .filter(|id| *id > 0)
            .map(ProductId)
            .ok_or_else(|| ValidationError::MustBePositive {
                field: "id".to_string(),
            })
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// What kind of catalog resource an id resolves to.
///
/// Catalogs hold more than sellable goods (category pages, plain content
/// pages); only [`ProductKind::Product`] can be put in a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Product,
    Category,
    Page,
}

impl ProductKind {
    #[inline]
    pub const fn is_cart_eligible(&self) -> bool {
        matches!(self, ProductKind::Product)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog resource as resolved by a product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    pub kind: ProductKind,

    /// Current price in cents.
    pub price_cents: i64,

    /// Current shipping weight in grams.
    pub weight_grams: i64,

    /// Soft-deleted resources are hidden unless the cart allows them.
    pub deleted: bool,

    /// Unpublished resources are hidden unless the cart allows them.
    pub published: bool,
}

impl Product {
    /// A published, non-deleted, cart-eligible product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, weight: Weight) -> Self {
        Product {
            id,
            name: name.into(),
            kind: ProductKind::Product,
            price_cents: price.cents(),
            weight_grams: weight.grams(),
            deleted: false,
            published: true,
        }
    }

    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        Weight::from_grams(self.weight_grams)
    }

    #[inline]
    pub fn is_cart_eligible(&self) -> bool {
        self.kind.is_cart_eligible()
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Caller-supplied selection data (color, size, engraving text...).
///
/// A sorted map, so the same set of attributes always produces the same
/// line-item key regardless of the order the caller listed them in.
pub type Attributes = BTreeMap<String, Value>;

// =============================================================================
// Line Item
// =============================================================================

/// A line in the cart.
///
/// ## Snapshot Pattern
/// `price` and `weight` are frozen when the line is created. A later catalog
/// change never alters lines already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Unit weight at time of adding (frozen).
    pub weight: Weight,

    /// Quantity; always > 0 while the line is in the cart.
    pub count: i64,

    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub attributes: Attributes,

    /// Restored carts that predate this field get "now".
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line from a resolved product, freezing its price and weight.
    pub fn from_product(product: &Product, count: i64, attributes: Attributes) -> Self {
        LineItem {
            product_id: product.id,
            price: product.price(),
            weight: product.weight(),
            count,
            attributes,
            added_at: Utc::now(),
        }
    }

    /// Unit price × count.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.count)
    }

    /// Unit weight × count.
    #[inline]
    pub fn line_weight(&self) -> Weight {
        self.weight.multiply_quantity(self.count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
