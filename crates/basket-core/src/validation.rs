//! # Validation Module
//!
//! Turns loosely-typed input into domain values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Input Comes From                             │
//! │                                                                         │
//! │  Storefront form / JSON body                                           │
//! │  { "action": "add", "id": "5", "count": "2.9" }                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE                                                           │
//! │  ├── parse_product_id("5")  → ProductId(5)                             │
//! │  └── coerce_count("2.9")    → 2   (truncation, never rounding)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  CartService::add_product(ProductId(5), 2, attributes)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{coerce_count, parse_product_id};
//! use serde_json::json;
//!
//! assert_eq!(parse_product_id(&json!("5")).unwrap().get(), 5);
//! assert_eq!(coerce_count(Some(&json!(2.9))), 2);
//! ```

use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::types::ProductId;

// =============================================================================
// Product Id
// =============================================================================

/// Validates a raw product id.
///
/// ## Rules
/// - Integers and numeric strings are accepted (`5`, `"5"`, `" 5 "`)
/// - Floats are accepted only without a fractional part (`5.0`)
/// - Must be positive
pub fn parse_product_id(raw: &Value) -> ValidationResult<ProductId> {
    match raw {
        Value::Null => Err(required_id()),
        Value::Number(number) => {
            if let Some(id) = number.as_i64() {
                ProductId::new(id)
            } else if let Some(id) = number.as_u64() {
                // Beyond i64::MAX, still a positive integer.
                i64::try_from(id)
                    .map_err(|_| out_of_range_id())
                    .and_then(ProductId::new)
            } else {
                number
                    .as_f64()
                    .ok_or_else(|| invalid_id("not a number"))
                    .and_then(integral_id)
            }
        }
        Value::String(text) => parse_product_id_str(text),
        _ => Err(invalid_id("must be a number")),
    }
}

/// String flavor of [`parse_product_id`].
pub fn parse_product_id_str(text: &str) -> ValidationResult<ProductId> {
    let text = text.trim();

    if text.is_empty() {
        return Err(required_id());
    }

    if let Ok(id) = text.parse::<i64>() {
        return ProductId::new(id);
    }

    text.parse::<f64>()
        .map_err(|_| invalid_id("must be numeric"))
        .and_then(integral_id)
}

fn integral_id(value: f64) -> ValidationResult<ProductId> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(invalid_id("must be a whole number"));
    }
    if value > i64::MAX as f64 {
        return Err(out_of_range_id());
    }
    ProductId::new(value as i64)
}

fn required_id() -> ValidationError {
    ValidationError::Required {
        field: "id".to_string(),
    }
}

fn invalid_id(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: reason.to_string(),
    }
}

fn out_of_range_id() -> ValidationError {
    ValidationError::OutOfRange {
        field: "id".to_string(),
        min: 1,
        max: i64::MAX,
    }
}

// =============================================================================
// Count
// =============================================================================

/// Quantity used when the caller does not send one.
pub const DEFAULT_COUNT: i64 = 1;

/// Coerces a raw quantity to an integer.
///
/// ## Rules
/// - Missing or `null` → [`DEFAULT_COUNT`]
/// - Numbers are truncated toward zero (`2.9` → 2, `-2.9` → -2)
/// - Strings read their leading integer (`"2.9"` → 2, `"12 apples"` → 12)
/// - `true` → 1, `false` → 0
/// - Anything unparsable → 0
///
/// Never fails: a zero or negative result is handled by the cart operation
/// it feeds (removal for `change`, rejection for a new `add` line).
pub fn coerce_count(raw: Option<&Value>) -> i64 {
    match raw {
        None | Some(Value::Null) => DEFAULT_COUNT,
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(truncate))
            .unwrap_or(0),
        Some(Value::String(text)) => coerce_count_str(text),
        Some(Value::Bool(flag)) => i64::from(*flag),
        Some(_) => 0,
    }
}

/// String flavor of [`coerce_count`].
///
/// Reads an optional sign and the digits after leading whitespace, ignoring
/// whatever follows. No digits → 0. Overlong digit runs saturate.
pub fn coerce_count_str(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// `as` saturates at the i64 bounds and maps NaN to 0.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

// =============================================================================
// Limits
// =============================================================================

/// Validates a per-line maximum quantity.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_max_count(max: i64) -> ValidationResult<()> {
    if max < 1 {
        return Err(ValidationError::MustBePositive {
            field: "max_count_per_line".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
