//! # Localizer
//!
//! Turns a message key plus placeholders into display text.
//!
//! Templates use `[[+name]]` placeholders:
//!
//! ```rust
//! use basket_service::localizer::{Lexicon, Localizer, Placeholders};
//!
//! let lexicon = Lexicon::english();
//! let mut placeholders = Placeholders::new();
//! placeholders.insert("id".to_string(), "999".to_string());
//!
//! assert_eq!(
//!     lexicon.render("cart.add.err.not_found", &placeholders),
//!     "Product 999 was not found"
//! );
//! ```
//!
//! ## Lexicon Files
//! ```toml
//! language = "de"
//!
//! [messages]
//! "cart.add.success" = "Der Artikel wurde in den Warenkorb gelegt"
//! "cart.clean.success" = "Ihr Warenkorb ist leer"
//! ```
//!
//! Keys a file leaves out keep their English text.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Placeholder name → value.
pub type Placeholders = BTreeMap<String, String>;

/// Renders localized messages.
pub trait Localizer {
    /// Renders `key`. Unknown keys render as the key itself.
    fn render(&self, key: &str, placeholders: &Placeholders) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str, &Placeholders) -> String,
{
    fn render(&self, key: &str, placeholders: &Placeholders) -> String {
        self(key, placeholders)
    }
}

// =============================================================================
// Message Keys
// =============================================================================

/// Message keys used by the cart service.
pub mod keys {
    pub const ADD_SUCCESS: &str = "cart.add.success";
    pub const ADD_ERR_ID: &str = "cart.add.err.id";
    pub const ADD_ERR_NOT_FOUND: &str = "cart.add.err.not_found";
    pub const ADD_ERR_PRODUCT: &str = "cart.add.err.product";
    pub const ADD_ERR_COUNT: &str = "cart.add.err.count";
    pub const ADD_ERR_COUNT_INVALID: &str = "cart.add.err.count_invalid";
    pub const REMOVE_SUCCESS: &str = "cart.remove.success";
    pub const REMOVE_ERR: &str = "cart.remove.err";
    pub const CHANGE_SUCCESS: &str = "cart.change.success";
    pub const CHANGE_ERR: &str = "cart.change.err";
    pub const CLEAN_SUCCESS: &str = "cart.clean.success";
    pub const STATUS_SUCCESS: &str = "cart.status.success";
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::ADD_SUCCESS, "The product has been added to your cart"),
    (keys::ADD_ERR_ID, "Invalid product identifier: [[+id]]"),
    (keys::ADD_ERR_NOT_FOUND, "Product [[+id]] was not found"),
    (keys::ADD_ERR_PRODUCT, "Resource [[+id]] cannot be added to the cart"),
    (
        keys::ADD_ERR_COUNT,
        "You cannot add [[+count]] items at once, the limit is [[+max]]",
    ),
    (
        keys::ADD_ERR_COUNT_INVALID,
        "Quantity must be at least 1, got [[+count]]",
    ),
    (keys::REMOVE_SUCCESS, "The item has been removed from your cart"),
    (keys::REMOVE_ERR, "This item is not in your cart"),
    (keys::CHANGE_SUCCESS, "The quantity has been updated"),
    (keys::CHANGE_ERR, "This item is not in your cart"),
    (keys::CLEAN_SUCCESS, "Your cart is now empty"),
    (keys::STATUS_SUCCESS, "Cart status"),
];

// =============================================================================
// Lexicon
// =============================================================================

/// Key → template table for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    language: String,
    messages: HashMap<String, String>,
}

/// On-disk shape of a lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    language: Option<String>,
    #[serde(default)]
    messages: HashMap<String, String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon::english()
    }
}

impl Lexicon {
    /// The built-in English messages.
    pub fn english() -> Self {
        Lexicon {
            language: "en".to_string(),
            messages: ENGLISH
                .iter()
                .map(|(key, text)| (key.to_string(), text.to_string()))
                .collect(),
        }
    }

    /// Parses a TOML lexicon and overlays it on the English messages.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Self::parse(contents, None)
    }

    /// Like [`Lexicon::from_toml_str`], for a configured language.
    ///
    /// A file without `language` adopts `language`; a file naming another
    /// language is rejected.
    pub fn from_toml_str_for(contents: &str, language: &str) -> ConfigResult<Self> {
        Self::parse(contents, Some(language))
    }

    /// Loads a TOML lexicon file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading lexicon");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads a TOML lexicon file that must match `language`.
    pub fn load_for(path: &Path, language: &str) -> ConfigResult<Self> {
        info!(?path, language, "Loading lexicon");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str_for(&contents, language)
    }

    fn parse(contents: &str, expected: Option<&str>) -> ConfigResult<Self> {
        let file: LexiconFile = toml::from_str(contents)?;
        let mut lexicon = Lexicon::english();

        match (file.language, expected) {
            (Some(found), Some(expected)) if found != expected => {
                return Err(ConfigError::InvalidValue {
                    name: "language".to_string(),
                    value: found,
                });
            }
            (Some(language), _) => lexicon.language = language,
            (None, Some(expected)) => lexicon.language = expected.to_string(),
            (None, None) => {}
        }
        debug!(
            language = %lexicon.language,
            overrides = file.messages.len(),
            "Lexicon parsed"
        );
        lexicon.messages.extend(file.messages);

        Ok(lexicon)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Adds or replaces one template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }
}

impl Localizer for Lexicon {
    fn render(&self, key: &str, placeholders: &Placeholders) -> String {
        let template = self.get(key).unwrap_or(key);
        fill(template, placeholders)
    }
}

/// Substitutes `[[+name]]` tokens. Tokens without a value stay as written.
pub fn fill(template: &str, placeholders: &Placeholders) -> String {
    placeholders
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("[[+{}]]", name), value)
        })
}
