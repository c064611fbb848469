//! # basket-core: Pure Cart Domain for Basket
//!
//! This crate is the **heart** of Basket. It contains the cart data model and
//! its math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host application (web handler, CLI)             │   │
//! │  │      owns sessions, transport, product database                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartAction / CartService calls         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-service                               │   │
//! │  │    add, remove, change, clean, status, get, set                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  ids,     │  │   │
//! │  │   │  LineItem │  │   Weight  │  │  CartKey  │  │  counts   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CATALOG • NO SESSIONS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, LineItem)
//! - [`money`] / [`weight`] - Integer price and weight units
//! - [`key`] - Line-item key derivation
//! - [`cart`] - The cart mapping and its status fold
//! - [`error`] - Domain error types
//! - [`validation`] - Raw input validation and coercion
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Attributes, Cart, CartKey, LineItem, Money, Product, ProductId, Weight};
//!
//! let product = Product::new(
//!     ProductId::new(5).unwrap(),
//!     "Espresso Beans",
//!     Money::from_cents(1000),
//!     Weight::from_grams(1000),
//! );
//!
//! let mut cart = Cart::new();
//! let key = CartKey::derive(product.id, &Attributes::new());
//! cart.insert(key, LineItem::from_product(&product, 2, Attributes::new()));
//!
//! let status = cart.status();
//! assert_eq!(status.count, 2);
//! assert_eq!(status.total.cents(), 2000);
//! assert_eq!(status.weight.grams(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod key;
pub mod money;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartStatus};
pub use error::{CartError, ValidationError, ValidationResult};
pub use key::CartKey;
pub use money::Money;
pub use types::*;
pub use weight::Weight;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum quantity for a single add to one cart line.
///
/// Catches typos like 1000 instead of 10. Overridable per deployment through
/// the service configuration.
pub const DEFAULT_MAX_COUNT_PER_LINE: i64 = 1000;
