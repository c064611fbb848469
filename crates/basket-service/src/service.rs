//! # Cart Service
//!
//! Add, remove, change and clean operations over a borrowed [`Cart`].
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(product_id, count, attributes)                                     │
//! │    │                                                                    │
//! │    ├── id ≤ 0 ───────────────────────────► InvalidProductId  (no data)  │
//! │    ├── catalog.resolve(id, filter) = None ► ProductNotFound   (status)  │
//! │    ├── not a product ────────────────────► NotAProduct       (status)  │
//! │    ├── count > max_count_per_line ───────► CountLimitExceeded (+count)  │
//! │    │                                                                    │
//! │    ├── fire BeforeAddToCart (may adjust product, count, attributes)     │
//! │    ├── key = md5(id ++ attributes)                                      │
//! │    │                                                                    │
//! │    ├── key in cart ──► change(key, existing + count)                    │
//! │    ├── count ≤ 0 ────► InvalidCount (+count)                            │
//! │    └── insert line ──► fire AfterAddToCart ──► success (status + key)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation returns a [`CartResponse`]; none of them panic or return
//! `Err`. The service borrows the cart for its lifetime, so the session owner
//! decides when the cart is restored and saved.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use basket_core::{
    Attributes, Cart, CartError, CartKey, CartStatus, LineItem, ProductId,
};

use crate::catalog::ProductCatalog;
use crate::config::CartConfig;
use crate::hooks::{CartEvent, EventHook, Hooks};
use crate::localizer::{keys, Localizer, Placeholders};
use crate::response::CartResponse;

/// Cart operations bound to one cart and its collaborators.
pub struct CartService<'a> {
    cart: &'a mut Cart,
    catalog: &'a dyn ProductCatalog,
    localizer: &'a dyn Localizer,
    hooks: Hooks<'a>,
    config: CartConfig,
}

impl<'a> CartService<'a> {
    /// Creates a service with the default configuration and no hooks.
    pub fn new(
        cart: &'a mut Cart,
        catalog: &'a dyn ProductCatalog,
        localizer: &'a dyn Localizer,
    ) -> Self {
        CartService {
            cart,
            catalog,
            localizer,
            hooks: Hooks::new(),
            config: CartConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CartConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers one more hook.
    pub fn with_hook(mut self, hook: impl EventHook + 'a) -> Self {
        self.hooks.register(hook);
        self
    }

    /// Replaces the hook registry.
    pub fn with_hooks(mut self, hooks: Hooks<'a>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds `count` of a product with the given attribute selection.
    ///
    /// A selection already in the cart is merged into its line.
    pub fn add(&mut self, product_id: i64, count: i64, attributes: Attributes) -> CartResponse {
        match ProductId::new(product_id) {
            Ok(id) => self.add_product(id, count, attributes),
            Err(e) => {
                warn!(product_id, error = %e, "Rejected add: invalid product id");
                self.invalid_product_id(product_id.to_string())
            }
        }
    }

    /// [`add`](Self::add) for an id that is already validated.
    pub fn add_product(
        &mut self,
        id: ProductId,
        count: i64,
        attributes: Attributes,
    ) -> CartResponse {
        debug!(product_id = %id, count, attributes = attributes.len(), "add command");

        let Some(mut product) = self.catalog.resolve(id, self.config.catalog_filter()) else {
            warn!(product_id = %id, "Rejected add: product not found");
            return self.fail(
                CartError::ProductNotFound(id),
                keys::ADD_ERR_NOT_FOUND,
                self.status_with(Map::new()),
            );
        };

        if !product.is_cart_eligible() {
            warn!(product_id = %id, kind = ?product.kind, "Rejected add: not a product");
            return self.fail(
                CartError::NotAProduct(id),
                keys::ADD_ERR_PRODUCT,
                self.status_with(Map::new()),
            );
        }

        let max = self.config.max_count_per_line;
        if count > max {
            warn!(product_id = %id, count, max, "Rejected add: count over limit");
            return self.fail(
                CartError::CountLimitExceeded { requested: count, max },
                keys::ADD_ERR_COUNT,
                self.status_with(count_data(count)),
            );
        }

        let mut count = count;
        let mut attributes = attributes;
        self.hooks.fire(&mut CartEvent::BeforeAdd {
            product: &mut product,
            count: &mut count,
            attributes: &mut attributes,
        });

        // The line belongs to the requested id; hooks only shape the snapshot.
        let key = CartKey::derive(id, &attributes);

        if let Some(existing) = self.cart.get(&key).map(|item| item.count) {
            debug!(key = %key, existing, count, "Selection already in cart, merging");
            return self.change(&key, existing.saturating_add(count));
        }

        if count <= 0 {
            warn!(product_id = %id, count, "Rejected add: non-positive count for new line");
            return self.fail(
                CartError::InvalidCount(count),
                keys::ADD_ERR_COUNT_INVALID,
                self.status_with(count_data(count)),
            );
        }

        let mut item = LineItem::from_product(&product, count, attributes);
        item.product_id = id;
        self.cart.insert(key.clone(), item);
        self.hooks.fire(&mut CartEvent::AfterAdd {
            key: &key,
            cart: &*self.cart,
        });

        info!(key = %key, product_id = %id, count, "Line added to cart");
        self.succeed(keys::ADD_SUCCESS, self.status_with(key_data(&key)))
    }

    /// Deletes a line.
    ///
    /// A missing key fails without status data, unlike [`change`](Self::change).
    pub fn remove(&mut self, key: &CartKey) -> CartResponse {
        debug!(key = %key, "remove command");

        if !self.cart.contains_key(key) {
            warn!(key = %key, "Rejected remove: key not in cart");
            return self.fail(CartError::KeyNotFound(key.clone()), keys::REMOVE_ERR, Map::new());
        }

        self.hooks.fire(&mut CartEvent::BeforeRemove {
            key,
            cart: &*self.cart,
        });
        self.cart.remove(key);
        self.hooks.fire(&mut CartEvent::AfterRemove {
            key,
            cart: &*self.cart,
        });

        info!(key = %key, "Line removed from cart");
        self.succeed(keys::REMOVE_SUCCESS, self.status_with(Map::new()))
    }

    /// Sets a line's count. Zero or below removes the line.
    pub fn change(&mut self, key: &CartKey, count: i64) -> CartResponse {
        debug!(key = %key, count, "change command");

        if !self.cart.contains_key(key) {
            warn!(key = %key, "Rejected change: key not in cart");
            return self.fail(
                CartError::KeyNotFound(key.clone()),
                keys::CHANGE_ERR,
                self.status_with(Map::new()),
            );
        }

        if count <= 0 {
            debug!(key = %key, count, "Non-positive count, removing line");
            return self.remove(key);
        }

        self.hooks.fire(&mut CartEvent::BeforeChange {
            key,
            count,
            cart: &*self.cart,
        });
        if let Some(item) = self.cart.get_mut(key) {
            item.count = count;
        }
        self.hooks.fire(&mut CartEvent::AfterChange {
            key,
            count,
            cart: &*self.cart,
        });

        info!(key = %key, count, "Line count changed");
        self.succeed(keys::CHANGE_SUCCESS, self.status_with(key_data(key)))
    }

    /// Empties the cart.
    pub fn clean(&mut self) -> CartResponse {
        debug!(lines = self.cart.len(), "clean command");

        self.hooks.fire(&mut CartEvent::BeforeClean { cart: &*self.cart });
        self.cart.clear();
        self.hooks.fire(&mut CartEvent::AfterClean { cart: &*self.cart });

        info!("Cart emptied");
        self.succeed(keys::CLEAN_SUCCESS, self.status_with(Map::new()))
    }

    // =========================================================================
    // Reads and Persistence Boundary
    // =========================================================================

    /// Current totals.
    pub fn status(&self) -> CartStatus {
        self.cart.status()
    }

    /// Current totals as a JSON object with `extra` merged in last.
    pub fn status_with(&self, extra: Map<String, Value>) -> Map<String, Value> {
        self.status().with_extra(extra)
    }

    /// Read view of the live cart.
    pub fn get(&self) -> &Cart {
        &*self.cart
    }

    /// Replaces the cart wholesale. No validation, no hooks.
    pub fn set(&mut self, cart: Cart) {
        debug!(lines = cart.len(), "set command");
        *self.cart = cart;
    }

    // =========================================================================
    // Response Helpers
    // =========================================================================

    pub(crate) fn invalid_product_id(&self, raw: String) -> CartResponse {
        self.fail(CartError::InvalidProductId { raw }, keys::ADD_ERR_ID, Map::new())
    }

    pub(crate) fn succeed(&self, message_key: &str, data: Map<String, Value>) -> CartResponse {
        CartResponse::success(self.localizer.render(message_key, &Placeholders::new()), data)
    }

    fn fail(&self, error: CartError, message_key: &str, data: Map<String, Value>) -> CartResponse {
        debug!(code = error.code(), message_key, "Cart operation failed");
        let message = self.localizer.render(message_key, &placeholders_for(&error));
        CartResponse::failure(error, message, data)
    }
}

impl fmt::Debug for CartService<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartService")
            .field("cart", &self.cart)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn key_data(key: &CartKey) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("key".to_string(), Value::from(key.as_str()));
    data
}

fn count_data(count: i64) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("count".to_string(), Value::from(count));
    data
}

fn placeholders_for(error: &CartError) -> Placeholders {
    let mut placeholders = Placeholders::new();
    match error {
        CartError::InvalidProductId { raw } => {
            placeholders.insert("id".to_string(), raw.clone());
        }
        CartError::ProductNotFound(id) | CartError::NotAProduct(id) => {
            placeholders.insert("id".to_string(), id.to_string());
        }
        CartError::CountLimitExceeded { requested, max } => {
            placeholders.insert("count".to_string(), requested.to_string());
            placeholders.insert("max".to_string(), max.to_string());
        }
        CartError::InvalidCount(count) => {
            placeholders.insert("count".to_string(), count.to_string());
        }
        CartError::KeyNotFound(key) => {
            placeholders.insert("key".to_string(), key.to_string());
        }
    }
    placeholders
}

// =============================================================================
// Unit Tests
// =============================================================================
