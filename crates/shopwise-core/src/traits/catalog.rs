// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only product catalog trait.

use async_trait::async_trait;

use crate::error::ShopwiseError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Product, ProductQuery};

/// Adapter for the product catalog.
///
/// Implementations must scope every query to `query.workspace_id` through
/// the owning store, return only active products, and return each
/// product's variants sorted by ascending price.
#[async_trait]
pub trait ProductStore: PluginAdapter {
    /// Returns up to `query.limit` products matching any predicate in `query.any_of`.
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ShopwiseError>;
}
