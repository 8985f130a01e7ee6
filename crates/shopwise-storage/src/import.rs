// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog import from JSON documents.
//!
//! The document carries one store and its products:
//!
//! ```json
//! {
//!   "store": { "id": "s1", "workspaceId": "ws1", "name": "Demo", "domain": "demo.example.com" },
//!   "products": [
//!     { "id": "p1", "title": "Gold Ring", "handle": "gold-ring",
//!       "variants": [ { "id": "v1", "name": "Default", "price": 49.0, "stock": 3 } ] }
//!   ]
//! }
//! ```
//!
//! Products and variants are upserted by id. A product's variant set is
//! replaced wholesale on every import.

use serde::{Deserialize, Serialize};
use shopwise_core::ShopwiseError;
use shopwise_core::types::{ProductStatus, StoreSummary, Variant};
use tracing::info;

use crate::database::{Database, map_tr_err};

/// A catalog document for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogImport {
    pub store: StoreSummary,
    #[serde(default)]
    pub products: Vec<ImportedProduct>,
}

/// A product as it appears in an import document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportedProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default = "default_status")]
    pub status: ProductStatus,
    #[serde(default = "default_chat_enabled")]
    pub chat_enabled: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

fn default_status() -> ProductStatus {
    ProductStatus::Active
}

fn default_chat_enabled() -> bool {
    true
}

/// Counts of rows written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub products: usize,
    pub variants: usize,
}

impl CatalogImport {
    /// Parse an import document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ShopwiseError> {
        serde_json::from_str(text)
            .map_err(|e| ShopwiseError::Config(format!("invalid catalog document: {e}")))
    }
}

/// Write the document's store, products and variants in one transaction.
pub async fn import_catalog(
    db: &Database,
    catalog: CatalogImport,
) -> Result<ImportSummary, ShopwiseError> {
    // Serialize images up front so the closure only sees rusqlite errors.
    let images = catalog
        .products
        .iter()
        .map(|p| serde_json::to_string(&p.images))
        .collect::<Result<Vec<_>, _>>()
        .map_err(ShopwiseError::storage)?;
    let store_id = catalog.store.id.clone();

    let summary = db
        .connection()
        .call(move |conn| -> Result<ImportSummary, rusqlite::Error> {
            let tx = conn.transaction()?;
            let store = &catalog.store;
            tx.execute(
                "INSERT INTO stores (id, workspace_id, name, domain) VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT (id) DO UPDATE SET workspace_id = excluded.workspace_id, \
                 name = excluded.name, domain = excluded.domain",
                rusqlite::params![store.id, store.workspace_id, store.name, store.domain],
            )?;

            let mut summary = ImportSummary::default();
            for (product, images) in catalog.products.iter().zip(images) {
                tx.execute(
                    "INSERT INTO products (id, store_id, title, description, category, brand, \
                     status, chat_enabled, price, handle, images) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
                     ON CONFLICT (id) DO UPDATE SET store_id = excluded.store_id, \
                     title = excluded.title, description = excluded.description, \
                     category = excluded.category, brand = excluded.brand, \
                     status = excluded.status, chat_enabled = excluded.chat_enabled, \
                     price = excluded.price, handle = excluded.handle, images = excluded.images",
                    rusqlite::params![
                        product.id,
                        store.id,
                        product.title,
                        product.description,
                        product.category,
                        product.brand,
                        product.status.to_string(),
                        product.chat_enabled,
                        product.price,
                        product.handle,
                        images,
                    ],
                )?;
                tx.execute(
                    "DELETE FROM variants WHERE product_id = ?1",
                    [&product.id],
                )?;
                for variant in &product.variants {
                    tx.execute(
                        "INSERT INTO variants (id, product_id, name, price, stock, sku) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                         ON CONFLICT (id) DO UPDATE SET product_id = excluded.product_id, \
                         name = excluded.name, price = excluded.price, \
                         stock = excluded.stock, sku = excluded.sku",
                        rusqlite::params![
                            variant.id,
                            product.id,
                            variant.name,
                            variant.price,
                            variant.stock,
                            variant.sku,
                        ],
                    )?;
                    summary.variants += 1;
                }
                summary.products += 1;
            }
            tx.commit()?;
            Ok(summary)
        })
        .await
        .map_err(map_tr_err)?;

    info!(
        store_id = %store_id,
        products = summary.products,
        variants = summary.variants,
        "catalog imported"
    );
    Ok(summary)
}
