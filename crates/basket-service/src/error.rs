//! # Service Error Types
//!
//! Cart operation failures never use these: they are [`CartError`]s carried
//! inside a failed [`CartResponse`]. The errors here cover loading the
//! service's own inputs (config and lexicon files).
//!
//! [`CartError`]: basket_core::CartError
//! [`CartResponse`]: crate::response::CartResponse

use basket_core::ValidationError;
use thiserror::Error;

/// Configuration and lexicon loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config or lexicon file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the expected shape.
    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Writing a config file failed to serialize.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but breaks a rule (e.g. max count below 1).
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    /// A textual value (environment variable, enum string) is not recognized.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },
}

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidValue {
            name: "BASKET_RESPONSE_FORMAT".to_string(),
            value: "xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for BASKET_RESPONSE_FORMAT: 'xml'"
        );
    }

    #[test]
    fn test_validation_converts_to_config_error() {
        let err: ConfigError = ValidationError::MustBePositive {
            field: "max_count_per_line".to_string(),
        }
        .into();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
