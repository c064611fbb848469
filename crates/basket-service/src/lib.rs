//! # basket-service: Cart Operations for Basket
//!
//! [`CartService`] runs add / remove / change / clean against a cart it
//! borrows from the session owner, asking narrow collaborators for
//! everything it does not own.
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CartService<'a>                                │
//! │                                                                         │
//! │   &'a mut Cart ◄──────── SessionStore (load / save around a request)   │
//! │                                                                         │
//! │   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐           │
//! │   │ ProductCatalog │  │   Localizer    │  │     Hooks      │           │
//! │   │ resolve(id,    │  │ render(key,    │  │ Before/After   │           │
//! │   │   filter)      │  │   placeholders)│  │ events, no veto│           │
//! │   └────────────────┘  └────────────────┘  └────────────────┘           │
//! │     InMemoryCatalog       Lexicon            closures                   │
//! │                                                                         │
//! │   CartConfig: max count, deleted/unpublished switches, output format   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use basket_core::{Attributes, Cart, Money, Product, ProductId, Weight};
//! use basket_service::{CartService, InMemoryCatalog, Lexicon};
//!
//! let catalog = InMemoryCatalog::new().with_product(Product::new(
//!     ProductId::new(5).unwrap(),
//!     "Espresso Beans",
//!     Money::from_cents(1000),
//!     Weight::from_grams(1000),
//! ));
//! let lexicon = Lexicon::english();
//! let mut cart = Cart::new();
//! let mut service = CartService::new(&mut cart, &catalog, &lexicon);
//!
//! let response = service.add(5, 2, Attributes::new());
//! assert!(response.success);
//! assert_eq!(service.status().total, Money::from_cents(2000));
//! ```
//!
//! The library emits `tracing` events and never installs a subscriber.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hooks;
pub mod localizer;
pub mod response;
pub mod service;
pub mod session;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::CartAction;
pub use catalog::{CatalogFilter, InMemoryCatalog, ProductCatalog};
pub use config::CartConfig;
pub use error::{ConfigError, ConfigResult};
pub use hooks::{CartEvent, EventHook, Hooks};
pub use localizer::{Lexicon, Localizer, Placeholders};
pub use response::{CartResponse, Rendered, ResponseFormat};
pub use service::CartService;
pub use session::{with_session, MemorySessionStore, SessionStore};
