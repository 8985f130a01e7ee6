// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog fixture builders.

use shopwise_core::types::{Product, ProductStatus, StoreSummary, Variant};

/// Store summary for `workspace_id` with a predictable id and domain.
pub fn store_summary(workspace_id: &str) -> StoreSummary {
    StoreSummary {
        id: format!("store-{workspace_id}"),
        workspace_id: workspace_id.to_string(),
        name: format!("Store {workspace_id}"),
        domain: Some(format!("{workspace_id}.example.com")),
    }
}

/// Fluent builder for catalog products.
///
/// Products default to `ACTIVE`, chat-enabled, with no variants.
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn new(workspace_id: &str, title: &str) -> Self {
        let handle = title.to_lowercase().replace(' ', "-");
        Self {
            product: Product {
                id: format!("prod-{workspace_id}-{handle}"),
                title: title.to_string(),
                description: None,
                category: None,
                brand: None,
                status: ProductStatus::Active,
                chat_enabled: true,
                price: None,
                handle: Some(handle),
                images: Vec::new(),
                variants: Vec::new(),
                store: store_summary(workspace_id),
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.product.id = id.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.product.description = Some(description.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.product.category = Some(category.to_string());
        self
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.product.brand = Some(brand.to_string());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.product.price = Some(price);
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.product.images.push(url.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.product.status = ProductStatus::Inactive;
        self
    }

    /// Add a variant; its id is derived from the product id and position.
    pub fn variant(mut self, name: &str, price: f64, stock: i64) -> Self {
        let id = format!("{}-v{}", self.product.id, self.product.variants.len() + 1);
        self.product.variants.push(Variant {
            id,
            name: name.to_string(),
            price,
            stock,
            sku: None,
        });
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}
