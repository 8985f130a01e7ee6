// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory product store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use shopwise_core::traits::{PluginAdapter, ProductStore};
use shopwise_core::types::{
    AdapterType, FieldMatch, HealthStatus, Product, ProductField, ProductQuery, ProductStatus,
};
use shopwise_core::ShopwiseError;

/// A [`ProductStore`] backed by a `Vec`, applying the same filters as the
/// SQLite store: workspace scope, `ACTIVE` status, OR'd case-insensitive
/// substring predicates, optional stock filter and a result limit.
/// Products are returned in insertion order with variants sorted by price.
#[derive(Default)]
pub struct MemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
    queries: Arc<RwLock<Vec<ProductQuery>>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
            ..Self::default()
        }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }

    /// Make every subsequent query fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Queries received so far, in call order.
    pub async fn queries(&self) -> Vec<ProductQuery> {
        self.queries.read().await.clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn field_value(product: &Product, field: ProductField) -> Option<&str> {
    match field {
        ProductField::Title => Some(product.title.as_str()),
        ProductField::Description => product.description.as_deref(),
        ProductField::Category => product.category.as_deref(),
        ProductField::Brand => product.brand.as_deref(),
    }
}

fn matches(product: &Product, predicate: &FieldMatch) -> bool {
    let needle = predicate.needle.to_lowercase();
    field_value(product, predicate.field)
        .map(|value| value.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

#[async_trait]
impl PluginAdapter for MemoryCatalog {
    fn name(&self) -> &str {
        "memory-catalog"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, ShopwiseError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProductStore for MemoryCatalog {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopwiseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.write().await.push(query.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(ShopwiseError::storage("memory catalog is failing"));
        }

        let products = self.products.read().await;
        let found = products
            .iter()
            .filter(|p| p.store.workspace_id == query.workspace_id)
            .filter(|p| p.status == ProductStatus::Active)
            .filter(|p| query.any_of.iter().any(|m| matches(p, m)))
            .filter(|p| !query.require_in_stock || p.in_stock())
            .take(query.limit)
            .map(|p| {
                let mut product = p.clone();
                product
                    .variants
                    .sort_by(|a, b| a.price.total_cmp(&b.price));
                product
            })
            .collect();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ProductBuilder;

    fn query(workspace: &str, needle: &str) -> ProductQuery {
        ProductQuery {
            workspace_id: workspace.to_string(),
            any_of: vec![FieldMatch::new(ProductField::Title, needle)],
            require_in_stock: false,
            limit: 3,
        }
    }

    #[tokio::test]
    async fn scopes_by_workspace_and_status() {
        let catalog = MemoryCatalog::with_products(vec![
            ProductBuilder::new("w1", "Red Shirt").build(),
            ProductBuilder::new("w2", "Red Shirt").build(),
            ProductBuilder::new("w1", "Red Hat").inactive().build(),
        ]);
        let found = catalog.find_products(&query("w1", "red")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].store.workspace_id, "w1");
    }

    #[tokio::test]
    async fn stock_filter_and_variant_order() {
        let catalog = MemoryCatalog::with_products(vec![
            ProductBuilder::new("w1", "Gold Ring")
                .variant("Large", 30.0, 1)
                .variant("Small", 10.0, 0)
                .build(),
            ProductBuilder::new("w1", "Silver Ring")
                .variant("One size", 5.0, 0)
                .build(),
        ]);
        let mut q = query("w1", "RING");
        q.require_in_stock = true;
        let found = catalog.find_products(&q).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].variants[0].name, "Small");
    }

    #[tokio::test]
    async fn empty_predicates_match_nothing() {
        let catalog =
            MemoryCatalog::with_products(vec![ProductBuilder::new("w1", "Anything").build()]);
        let mut q = query("w1", "x");
        q.any_of.clear();
        assert!(catalog.find_products(&q).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_mode_returns_storage_error() {
        let catalog = MemoryCatalog::new();
        catalog.set_failing(true);
        let err = catalog.find_products(&query("w1", "x")).await.unwrap_err();
        assert!(matches!(err, ShopwiseError::Storage { .. }));
        assert_eq!(catalog.call_count(), 1);
    }
}
