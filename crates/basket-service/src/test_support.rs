//! Shared fixtures for unit tests.

use basket_core::{Attributes, Money, Product, ProductId, ProductKind, Weight};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::catalog::InMemoryCatalog;

/// Espresso beans: 10.00, 1 kg.
pub const BEANS: i64 = 5;

/// A category page, resolvable but not cart-eligible.
pub const CATEGORY: i64 = 7;

/// Installs a test-friendly subscriber once. Later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,basket_service=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_product(Product::new(
            ProductId::new(BEANS).unwrap(),
            "Espresso Beans",
            Money::from_cents(1000),
            Weight::from_grams(1000),
        ))
        .with_product(
            Product::new(
                ProductId::new(CATEGORY).unwrap(),
                "Coffee",
                Money::zero(),
                Weight::zero(),
            )
            .with_kind(ProductKind::Category),
        )
}

/// Attributes from a JSON object literal.
pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Attributes::new(),
    }
}
