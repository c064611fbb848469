//! # Line-Item Keys
//!
//! Every cart line is addressed by a key derived from what makes two
//! selections "the same line": the product and its attributes.
//!
//! ```text
//! key = md5( "<product_id>" ++ canonical_json(attributes) )  → 32 hex chars
//!
//!   (5, {})                  → 1 line
//!   (5, {})      again       → same key, counts accumulate
//!   (5, {color: "red"})      → different key, separate line
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Attributes, ProductId};

/// Key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(String);

impl CartKey {
    /// Derives the key for a product/attributes selection.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Attributes, CartKey, ProductId};
    ///
    /// let id = ProductId::new(5).unwrap();
    /// let a = CartKey::derive(id, &Attributes::new());
    /// let b = CartKey::derive(id, &Attributes::new());
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 32);
    /// ```
    pub fn derive(product_id: ProductId, attributes: &Attributes) -> Self {
        let mut material = product_id.to_string();
        material.push_str(&canonical_json(attributes));
        CartKey(format!("{:x}", md5::compute(material.as_bytes())))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Object keys come out sorted: `Attributes` is a BTreeMap and nested
/// objects use serde_json's default sorted map.
fn canonical_json(attributes: &Attributes) -> String {
    let object = attributes
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    Value::Object(object).to_string()
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CartKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CartKey {
    fn from(raw: String) -> Self {
        CartKey(raw)
    }
}

impl From<&str> for CartKey {
    fn from(raw: &str) -> Self {
        CartKey(raw.to_string())
    }
}
