//! # Cart Configuration
//!
//! Per-deployment knobs for the cart service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_MAX_COUNT=50                                                │
//! │     BASKET_RESPONSE_FORMAT=json                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/basket/basket.toml (Linux)                               │
//! │     ~/Library/Application Support/com.basket.basket/basket.toml        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     max 1000 per add, live products only, structured responses         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # basket.toml
//! max_count_per_line = 1000
//! allow_deleted_products = false
//! allow_unpublished_products = false
//! response_format = "structured"  # structured | json
//! language = "en"
//! lexicon_path = "/etc/basket/lexicon.de.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use basket_core::validation::validate_max_count;
use basket_core::{ValidationError, DEFAULT_MAX_COUNT_PER_LINE};

use crate::catalog::CatalogFilter;
use crate::error::{ConfigError, ConfigResult};
use crate::localizer::Lexicon;
use crate::response::ResponseFormat;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_MAX_COUNT: &str = "BASKET_MAX_COUNT";
pub const ENV_ALLOW_DELETED: &str = "BASKET_ALLOW_DELETED";
pub const ENV_ALLOW_UNPUBLISHED: &str = "BASKET_ALLOW_UNPUBLISHED";
pub const ENV_RESPONSE_FORMAT: &str = "BASKET_RESPONSE_FORMAT";
pub const ENV_LANGUAGE: &str = "BASKET_LANGUAGE";
pub const ENV_LEXICON_PATH: &str = "BASKET_LEXICON_PATH";

// =============================================================================
// Cart Configuration
// =============================================================================

/// Cart service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Largest quantity accepted by a single add.
    #[serde(default = "default_max_count")]
    pub max_count_per_line: i64,

    /// Let soft-deleted catalog resources into the cart.
    #[serde(default)]
    pub allow_deleted_products: bool,

    /// Let unpublished catalog resources into the cart.
    #[serde(default)]
    pub allow_unpublished_products: bool,

    /// How responses leave the action boundary.
    #[serde(default)]
    pub response_format: ResponseFormat,

    /// Language code of the lexicon in use.
    #[serde(default = "default_language")]
    pub language: String,

    /// TOML lexicon overlaid on the built-in English messages.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

fn default_max_count() -> i64 {
    DEFAULT_MAX_COUNT_PER_LINE
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            max_count_per_line: default_max_count(),
            allow_deleted_products: false,
            allow_unpublished_products: false,
            response_format: ResponseFormat::default(),
            language: default_language(),
            lexicon_path: None,
        }
    }
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (basket.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document. No environment overrides.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: CartConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "config_path".to_string(),
                value: "<none>".to_string(),
            })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_max_count(self.max_count_per_line)?;

        if self.language.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "language".to_string(),
            }
            .into());
        }

        if self.language != "en" && self.lexicon_path.is_none() {
            return Err(ValidationError::Required {
                field: "lexicon_path".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any name → value source.
    ///
    /// Unparsable values are logged and ignored, leaving the previous value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_COUNT) {
            match raw.trim().parse::<i64>() {
                Ok(max) => {
                    debug!(max, "Overriding max count from environment");
                    self.max_count_per_line = max;
                }
                Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", ENV_MAX_COUNT),
            }
        }

        if let Some(raw) = lookup(ENV_ALLOW_DELETED) {
            match parse_flag(ENV_ALLOW_DELETED, &raw) {
                Ok(flag) => self.allow_deleted_products = flag,
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(raw) = lookup(ENV_ALLOW_UNPUBLISHED) {
            match parse_flag(ENV_ALLOW_UNPUBLISHED, &raw) {
                Ok(flag) => self.allow_unpublished_products = flag,
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(raw) = lookup(ENV_RESPONSE_FORMAT) {
            match raw.parse::<ResponseFormat>() {
                Ok(format) => {
                    debug!(%format, "Overriding response format from environment");
                    self.response_format = format;
                }
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(language) = lookup(ENV_LANGUAGE) {
            self.language = language;
        }

        if let Some(path) = lookup(ENV_LEXICON_PATH) {
            debug!(path = %path, "Overriding lexicon path from environment");
            self.lexicon_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "basket", "basket")
            .map(|dirs| dirs.config_dir().join("basket.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Catalog filter matching the deleted / unpublished switches.
    pub fn catalog_filter(&self) -> CatalogFilter {
        CatalogFilter {
            include_deleted: self.allow_deleted_products,
            include_unpublished: self.allow_unpublished_products,
        }
    }

    /// Messages for `language`: built-in English, overlaid with
    /// `lexicon_path` when set. The file must not name another language.
    pub fn load_lexicon(&self) -> ConfigResult<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::load_for(path, &self.language),
            None if self.language == "en" => Ok(Lexicon::english()),
            None => Err(ValidationError::Required {
                field: "lexicon_path".to_string(),
            }
            .into()),
        }
    }
}

/// Parses a boolean switch the way shells spell them.
fn parse_flag(name: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}
