//! # Cart Event Hooks
//!
//! Observers notified before and after every cart mutation.
//!
//! ## Event Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add     ── BeforeAddToCart ──► insert ──► AfterAddToCart               │
//! │             (product, count, attributes are &mut: hooks may adjust)     │
//! │                                                                         │
//! │  remove  ── BeforeRemoveFromCart ──► delete ──► AfterRemoveFromCart     │
//! │  change  ── BeforeChangeInCart   ──► set    ──► AfterChangeInCart       │
//! │  clean   ── BeforeEmptyCart      ──► clear  ──► AfterEmptyCart          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hooks run in registration order and cannot veto an operation. A failing
//! precondition (unknown key, product not found) fires no events at all.

use std::fmt;

use tracing::trace;

use basket_core::{Attributes, Cart, CartKey, Product};

/// A cart lifecycle event.
#[derive(Debug)]
pub enum CartEvent<'a> {
    BeforeAdd {
        product: &'a mut Product,
        count: &'a mut i64,
        attributes: &'a mut Attributes,
    },
    AfterAdd {
        key: &'a CartKey,
        cart: &'a Cart,
    },
    BeforeRemove {
        key: &'a CartKey,
        cart: &'a Cart,
    },
    AfterRemove {
        key: &'a CartKey,
        cart: &'a Cart,
    },
    BeforeChange {
        key: &'a CartKey,
        count: i64,
        cart: &'a Cart,
    },
    AfterChange {
        key: &'a CartKey,
        count: i64,
        cart: &'a Cart,
    },
    BeforeClean {
        cart: &'a Cart,
    },
    AfterClean {
        cart: &'a Cart,
    },
}

impl CartEvent<'_> {
    /// Event name as seen by plugin authors.
    pub const fn name(&self) -> &'static str {
        match self {
            CartEvent::BeforeAdd { .. } => "BeforeAddToCart",
            CartEvent::AfterAdd { .. } => "AfterAddToCart",
            CartEvent::BeforeRemove { .. } => "BeforeRemoveFromCart",
            CartEvent::AfterRemove { .. } => "AfterRemoveFromCart",
            CartEvent::BeforeChange { .. } => "BeforeChangeInCart",
            CartEvent::AfterChange { .. } => "AfterChangeInCart",
            CartEvent::BeforeClean { .. } => "BeforeEmptyCart",
            CartEvent::AfterClean { .. } => "AfterEmptyCart",
        }
    }
}

/// Receives cart events.
pub trait EventHook {
    fn on_event(&self, event: &mut CartEvent<'_>);
}

impl<F> EventHook for F
where
    F: Fn(&mut CartEvent<'_>),
{
    fn on_event(&self, event: &mut CartEvent<'_>) {
        self(event)
    }
}

// =============================================================================
// Hook Registry
// =============================================================================

/// Ordered list of hooks.
#[derive(Default)]
pub struct Hooks<'h> {
    hooks: Vec<Box<dyn EventHook + 'h>>,
}

impl<'h> Hooks<'h> {
    pub fn new() -> Self {
        Hooks { hooks: Vec::new() }
    }

    /// Appends a hook. Hooks fire in the order they were registered.
    pub fn register(&mut self, hook: impl EventHook + 'h) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Delivers `event` to every hook.
    pub fn fire(&self, event: &mut CartEvent<'_>) {
        trace!(event = event.name(), hooks = self.hooks.len(), "Firing cart event");
        for hook in &self.hooks {
            hook.on_event(event);
        }
    }
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_core::{Money, ProductId, Weight};
    use std::cell::RefCell;

    #[test]
    fn test_hooks_fire_in_registration_order() {
        let seen = RefCell::new(Vec::new());
        let mut hooks = Hooks::new();
        hooks.register(|event: &mut CartEvent<'_>| {
            seen.borrow_mut().push(format!("first:{}", event.name()))
        });
        hooks.register(|event: &mut CartEvent<'_>| {
            seen.borrow_mut().push(format!("second:{}", event.name()))
        });
        assert_eq!(hooks.len(), 2);

        let cart = Cart::new();
        hooks.fire(&mut CartEvent::BeforeClean { cart: &cart });

        assert_eq!(
            *seen.borrow(),
            vec!["first:BeforeEmptyCart", "second:BeforeEmptyCart"]
        );
    }

    #[test]
    fn test_before_add_hook_can_mutate() {
        let mut hooks = Hooks::new();
        hooks.register(|event: &mut CartEvent<'_>| {
            if let CartEvent::BeforeAdd { count, attributes, .. } = event {
                **count += 1;
                attributes.insert("gift".to_string(), serde_json::json!(true));
            }
        });

        let mut product = Product::new(
            ProductId::new(5).unwrap(),
            "Beans",
            Money::from_cents(1000),
            Weight::from_grams(1000),
        );
        let mut count = 2;
        let mut attributes = Attributes::new();

        hooks.fire(&mut CartEvent::BeforeAdd {
            product: &mut product,
            count: &mut count,
            attributes: &mut attributes,
        });

        assert_eq!(count, 3);
        assert_eq!(attributes.get("gift"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_event_names() {
        let cart = Cart::new();
        let key = CartKey::from("abc");
        assert_eq!(
            CartEvent::AfterChange { key: &key, count: 2, cart: &cart }.name(),
            "AfterChangeInCart"
        );
        assert_eq!(
            CartEvent::AfterRemove { key: &key, cart: &cart }.name(),
            "AfterRemoveFromCart"
        );
    }

    #[test]
    fn test_empty_registry_is_a_no_op() {
        let hooks = Hooks::default();
        assert!(hooks.is_empty());
        let cart = Cart::new();
        hooks.fire(&mut CartEvent::AfterClean { cart: &cart });
    }
}
