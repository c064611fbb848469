//! # Response Envelope
//!
//! Every cart operation answers with the same envelope:
//!
//! ```json
//! { "success": true, "message": "The product has been added to your cart",
//!   "data": { "count": 2, "total": 2000, "weight": 2000, "key": "3f9a..." } }
//! ```
//!
//! The service always builds a structured [`CartResponse`]. Flattening it to
//! a JSON string is a presentation choice made by [`ResponseFormat`] at the
//! action boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use basket_core::CartError;

use crate::error::ConfigError;

// =============================================================================
// Cart Response
// =============================================================================

/// Result of a cart operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartResponse {
    pub success: bool,

    /// Localized text for the shopper.
    pub message: String,

    /// Cart status, plus `key` or the rejected `count` where relevant.
    #[ts(type = "Record<string, unknown>")]
    pub data: Map<String, Value>,

    /// Typed failure for Rust callers. Never serialized.
    #[serde(skip)]
    #[ts(skip)]
    pub error: Option<CartError>,
}

impl CartResponse {
    pub fn success(message: impl Into<String>, data: Map<String, Value>) -> Self {
        CartResponse {
            success: true,
            message: message.into(),
            data,
            error: None,
        }
    }

    pub fn failure(error: CartError, message: impl Into<String>, data: Map<String, Value>) -> Self {
        CartResponse {
            success: false,
            message: message.into(),
            data,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Shortcut for `data["key"]` as a string.
    pub fn key(&self) -> Option<&str> {
        self.data.get("key").and_then(Value::as_str)
    }

    /// The envelope as a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "success": self.success,
            "message": self.message,
            "data": self.data,
        })
        .to_string()
    }
}

// =============================================================================
// Response Format
// =============================================================================

/// How responses leave the action boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Hand back the [`CartResponse`] value.
    #[default]
    Structured,

    /// Hand back the envelope encoded as a JSON string.
    Json,
}

impl ResponseFormat {
    pub fn render(self, response: CartResponse) -> Rendered {
        match self {
            ResponseFormat::Structured => Rendered::Structured(response),
            ResponseFormat::Json => Rendered::Json(response.to_json()),
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseFormat::Structured => write!(f, "structured"),
            ResponseFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ResponseFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "structured" | "object" => Ok(ResponseFormat::Structured),
            "json" | "string" => Ok(ResponseFormat::Json),
            other => Err(ConfigError::InvalidValue {
                name: "response_format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A response after [`ResponseFormat::render`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Structured(CartResponse),
    Json(String),
}

impl Rendered {
    /// The structured response, if this was not flattened.
    pub fn as_response(&self) -> Option<&CartResponse> {
        match self {
            Rendered::Structured(response) => Some(response),
            Rendered::Json(_) => None,
        }
    }

    /// The envelope as a JSON string, whichever form this is in.
    pub fn into_json(self) -> String {
        match self {
            Rendered::Structured(response) => response.to_json(),
            Rendered::Json(json) => json,
        }
    }
}
