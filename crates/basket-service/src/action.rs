//! # Action Boundary
//!
//! Entry point for untyped input: a storefront form or JSON body.
//!
//! ```json
//! { "action": "add", "id": "5", "count": "2", "attributes": { "color": "red" } }
//! { "action": "change", "key": "3f9a...", "count": 4 }
//! { "action": "remove", "key": "3f9a..." }
//! { "action": "clean" }
//! { "action": "status" }
//! ```
//!
//! [`CartService::dispatch`] validates the id, truncates the count, runs the
//! operation and renders the result in the configured [`ResponseFormat`].
//!
//! [`ResponseFormat`]: crate::response::ResponseFormat

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use basket_core::validation::{coerce_count, parse_product_id};
use basket_core::{Attributes, CartKey};

use crate::localizer::keys;
use crate::response::{CartResponse, Rendered};
use crate::service::CartService;

/// One cart request as it arrives from outside.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartAction {
    Add {
        id: Value,
        #[serde(default)]
        count: Option<Value>,
        #[serde(default, alias = "options")]
        attributes: Attributes,
    },
    Remove {
        key: CartKey,
    },
    /// A missing or `null` count means 0, which removes the line.
    Change {
        key: CartKey,
        #[serde(default)]
        count: Option<Value>,
    },
    Clean,
    Status,
}

impl CartAction {
    /// Action name as sent on the wire.
    pub const fn name(&self) -> &'static str {
        match self {
            CartAction::Add { .. } => "add",
            CartAction::Remove { .. } => "remove",
            CartAction::Change { .. } => "change",
            CartAction::Clean => "clean",
            CartAction::Status => "status",
        }
    }
}

impl CartService<'_> {
    /// Runs an action and renders the response in the configured format.
    pub fn dispatch(&mut self, action: CartAction) -> Rendered {
        let format = self.config().response_format;
        format.render(self.handle(action))
    }

    /// Runs an action and returns the structured response.
    pub fn handle(&mut self, action: CartAction) -> CartResponse {
        debug!(action = action.name(), "Dispatching cart action");

        match action {
            CartAction::Add {
                id,
                count,
                attributes,
            } => match parse_product_id(&id) {
                Ok(product_id) => {
                    self.add_product(product_id, coerce_count(count.as_ref()), attributes)
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Rejected add: invalid product id");
                    self.invalid_product_id(raw_text(&id))
                }
            },
            CartAction::Remove { key } => self.remove(&key),
            CartAction::Change { key, count } => {
                let count = count.as_ref().map_or(0, |raw| coerce_count(Some(raw)));
                self.change(&key, count)
            }
            CartAction::Clean => self.clean(),
            CartAction::Status => self.succeed(keys::STATUS_SUCCESS, self.status_with(Map::new())),
        }
    }
}

/// The id as the caller wrote it, without JSON string quotes.
fn raw_text(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use crate::localizer::Lexicon;
    use crate::response::ResponseFormat;
    use crate::test_support::{fixture_catalog, init_tracing};
    use basket_core::{Cart, CartError};
    use serde_json::json;

    fn action(value: Value) -> CartAction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            action(json!({ "action": "add", "id": "5" })),
            CartAction::Add {
                id: json!("5"),
                count: None,
                attributes: Attributes::new(),
            }
        );
        assert_eq!(
            action(json!({ "action": "remove", "key": "abc" })),
            CartAction::Remove {
                key: CartKey::from("abc")
            }
        );
        assert_eq!(action(json!({ "action": "clean" })), CartAction::Clean);
        assert!(serde_json::from_value::<CartAction>(json!({ "action": "checkout" })).is_err());
    }

    #[test]
    fn test_dispatch_truncates_count() {
        init_tracing();
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        let response = service.handle(action(json!({
            "action": "add",
            "id": "5",
            "count": "2.9"
        })));

        assert!(response.success);
        assert_eq!(response.data.get("count"), Some(&json!(2)));
    }

    #[test]
    fn test_dispatch_defaults_count_to_one() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        let response = service.handle(action(json!({
            "action": "add",
            "id": 5,
            "attributes": { "grind": "coarse" }
        })));

        assert!(response.success);
        assert_eq!(service.status().count, 1);
    }

    #[test]
    fn test_dispatch_rejects_bad_id() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        for id in [json!("abc"), json!(-1), json!(null), json!(2.5)] {
            let response = service.handle(action(json!({ "action": "add", "id": id })));
            assert!(!response.success);
            assert!(matches!(
                response.error,
                Some(CartError::InvalidProductId { .. })
            ));
            assert!(response.data.is_empty());
        }

        let response = service.handle(action(json!({ "action": "add", "id": "abc" })));
        assert_eq!(response.message, "Invalid product identifier: abc");
    }

    #[test]
    fn test_dispatch_change_and_remove() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        let added = service.handle(action(json!({ "action": "add", "id": 5, "count": 2 })));
        let key = added.key().unwrap().to_string();

        let changed = service.handle(action(json!({
            "action": "change",
            "key": key,
            "count": "6"
        })));
        assert!(changed.success);
        assert_eq!(service.status().count, 6);

        let removed = service.handle(action(json!({ "action": "remove", "key": key })));
        assert!(removed.success);
        assert!(service.get().is_empty());
    }

    #[test]
    fn test_change_without_count_removes_line() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        for change in [
            json!({ "action": "change" }),
            json!({ "action": "change", "count": null }),
        ] {
            let added = service.handle(action(json!({ "action": "add", "id": 5, "count": 5 })));
            let key = added.key().unwrap().to_string();
            let mut change = change;
            change["key"] = json!(key);

            let response = service.handle(action(change));

            assert!(response.success);
            assert_eq!(response.message, "The item has been removed from your cart");
            assert!(service.get().is_empty());
        }
    }

    #[test]
    fn test_dispatch_status() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);
        service.add(5, 3, Attributes::new());

        let response = service.handle(action(json!({ "action": "status" })));

        assert!(response.success);
        assert_eq!(response.message, "Cart status");
        assert_eq!(
            Value::Object(response.data),
            json!({ "count": 3, "total": 3000, "weight": 3000 })
        );
    }

    #[test]
    fn test_dispatch_json_format() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let config = CartConfig {
            response_format: ResponseFormat::Json,
            ..CartConfig::default()
        };
        let mut service = CartService::new(&mut cart, &catalog, &lexicon).with_config(config);

        let rendered = service.dispatch(action(json!({ "action": "add", "id": 5, "count": 2 })));

        let Rendered::Json(text) = rendered else {
            panic!("expected a JSON string");
        };
        let parsed: CartResponse = serde_json::from_str(&text).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.get("total"), Some(&json!(2000)));
    }

    #[test]
    fn test_dispatch_structured_by_default() {
        let catalog = fixture_catalog();
        let lexicon = Lexicon::english();
        let mut cart = Cart::new();
        let mut service = CartService::new(&mut cart, &catalog, &lexicon);

        let rendered = service.dispatch(CartAction::Clean);
        assert!(rendered.as_response().is_some_and(CartResponse::is_success));
    }
}
