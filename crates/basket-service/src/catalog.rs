//! # Product Catalog
//!
//! The cart never owns product data. It asks a [`ProductCatalog`] to resolve
//! an id at add time and snapshots what comes back.
//!
//! ```text
//! CartService::add(5, ..)
//!       │
//!       ▼
//! catalog.resolve(ProductId(5), CatalogFilter { include_deleted, include_unpublished })
//!       │
//!       ├── None           → ProductNotFound
//!       ├── Some(category) → NotAProduct
//!       └── Some(product)  → price / weight frozen into the LineItem
//! ```

use std::collections::BTreeMap;

use basket_core::{Product, ProductId};

/// Which hidden resources a lookup may return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub include_deleted: bool,
    pub include_unpublished: bool,
}

impl CatalogFilter {
    /// True if `product` is visible under this filter.
    pub fn admits(&self, product: &Product) -> bool {
        (self.include_deleted || !product.deleted)
            && (self.include_unpublished || product.published)
    }
}

/// Looks up catalog resources by id.
///
/// Implementations must apply `filter`: a deleted or unpublished resource the
/// filter does not admit resolves to `None`.
pub trait ProductCatalog {
    fn resolve(&self, id: ProductId, filter: CatalogFilter) -> Option<Product>;
}

impl<C: ProductCatalog + ?Sized> ProductCatalog for &C {
    fn resolve(&self, id: ProductId, filter: CatalogFilter) -> Option<Product> {
        (**self).resolve(id, filter)
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Catalog backed by an ordered map. Used by tests and small embedded hosts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    /// Adds or replaces a resource, returning the previous one.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.id, product)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_product(mut self, product: Product) -> Self {
        self.insert(product);
        self
    }

    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn resolve(&self, id: ProductId, filter: CatalogFilter) -> Option<Product> {
        self.products
            .get(&id)
            .filter(|product| filter.admits(product))
            .cloned()
    }
}
