//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CartError        - Cart operation failures (the taxonomy)         │
//! │  └── ValidationError  - Raw input validation failures                  │
//! │                                                                         │
//! │  basket-service errors                                                 │
//! │  └── ConfigError      - Config / lexicon loading failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → CartResponse { success: false }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart errors never escape an operation as a panic or an `Err` past the
//! service boundary; they become failed responses with a localized message.

use thiserror::Error;

use crate::key::CartKey;
use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The caller supplied something that is not a positive numeric id.
    #[error("Invalid product id: '{raw}'")]
    InvalidProductId { raw: String },

    /// The catalog has no resource with this id (or it was filtered out as
    /// deleted / unpublished).
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The resource exists but is not something that can be put in a cart.
    #[error("Resource {0} is not a product")]
    NotAProduct(ProductId),

    /// Requested quantity exceeds the per-line maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    CountLimitExceeded { requested: i64, max: i64 },

    /// A new line would be created with a non-positive quantity.
    #[error("Quantity {0} must be positive for a new cart line")]
    InvalidCount(i64),

    /// No line with this key.
    #[error("Cart key not found: {0}")]
    KeyNotFound(CartKey),
}

impl CartError {
    /// Machine-readable code, stable across lexicon changes.
    pub const fn code(&self) -> &'static str {
        match self {
            CartError::InvalidProductId { .. } => "INVALID_PRODUCT_ID",
            CartError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            CartError::NotAProduct(_) => "NOT_A_PRODUCT",
            CartError::CountLimitExceeded { .. } => "COUNT_LIMIT_EXCEEDED",
            CartError::InvalidCount(_) => "INVALID_COUNT",
            CartError::KeyNotFound(_) => "KEY_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning loosely-typed input (form fields, JSON payloads) into
/// domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
