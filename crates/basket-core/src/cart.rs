//! # Cart
//!
//! The cart mapping (`CartKey → LineItem`) and its status fold.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Service Operation         Cart Method            State Change          │
//! │  ─────────────────         ───────────            ────────────          │
//! │                                                                         │
//! │  add (new key) ──────────► insert(key, item) ───► entries.push(..)      │
//! │                                                                         │
//! │  add (known key) ────┐                                                  │
//! │  change ─────────────┴───► get_mut(key) ────────► item.count = n        │
//! │                                                                         │
//! │  remove / change(≤0) ────► remove(key) ─────────► entries.remove(i)     │
//! │                                                                         │
//! │  clean ──────────────────► clear() ─────────────► entries.clear()       │
//! │                                                                         │
//! │  status ─────────────────► CartStatus::from ────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines keep their insertion order so a storefront can render them in a
//! stable order. The serialized form is a JSON object keyed by cart key,
//! written and read back in that order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::key::CartKey;
use crate::money::Money;
use crate::types::LineItem;
use crate::weight::Weight;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an insertion-ordered map of key → line.
///
/// Carts are small, so lookups are linear scans over a `Vec`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: Vec<(CartKey, LineItem)>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &CartKey) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &CartKey) -> Option<&LineItem> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, item)| item)
    }

    pub fn get_mut(&mut self, key: &CartKey) -> Option<&mut LineItem> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, item)| item)
    }

    /// Inserts a line. An existing line with the same key is replaced in
    /// place (keeping its position) and returned.
    pub fn insert(&mut self, key: CartKey, item: LineItem) -> Option<LineItem> {
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, item)),
            None => {
                self.entries.push((key, item));
                None
            }
        }
    }

    /// Removes a line, preserving the order of the remaining lines.
    pub fn remove(&mut self, key: &CartKey) -> Option<LineItem> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CartKey, &LineItem)> {
        self.entries.iter().map(|(key, item)| (key, item))
    }

    pub fn keys(&self) -> impl Iterator<Item = &CartKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Folds the lines into a [`CartStatus`].
    pub fn status(&self) -> CartStatus {
        CartStatus::from(self)
    }

    fn position(&self, key: &CartKey) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl FromIterator<(CartKey, LineItem)> for Cart {
    fn from_iter<I: IntoIterator<Item = (CartKey, LineItem)>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for (key, item) in iter {
            cart.insert(key, item);
        }
        cart
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, item) in &self.entries {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CartVisitor;

        impl<'de> Visitor<'de> for CartVisitor {
            type Value = Cart;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of cart keys to line items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Cart, A::Error> {
                let mut cart = Cart::new();
                while let Some((key, item)) = access.next_entry::<CartKey, LineItem>()? {
                    cart.insert(key, item);
                }
                Ok(cart)
            }
        }

        deserializer.deserialize_map(CartVisitor)
    }
}

// =============================================================================
// Cart Status
// =============================================================================

/// Aggregate summary of the cart.
///
/// ```text
/// count  = Σ count_i
/// total  = Σ price_i  × count_i
/// weight = Σ weight_i × count_i
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartStatus {
    pub count: i64,
    pub total: Money,
    pub weight: Weight,
}

impl CartStatus {
    /// The status as a JSON object with `extra` merged in last.
    ///
    /// Extra fields win on collision.
    pub fn with_extra(&self, extra: Map<String, Value>) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("count".to_string(), Value::from(self.count));
        data.insert("total".to_string(), Value::from(self.total.cents()));
        data.insert("weight".to_string(), Value::from(self.weight.grams()));
        data.extend(extra);
        data
    }
}

impl From<&Cart> for CartStatus {
    fn from(cart: &Cart) -> Self {
        cart.iter()
            .fold(CartStatus::default(), |mut status, (_, item)| {
                status.count = status.count.saturating_add(item.count);
                status.total += item.line_total();
                status.weight += item.line_weight();
                status
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
