// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shopwise catalog import` implementation.

use std::path::Path;

use shopwise_config::ShopwiseConfig;
use shopwise_core::ShopwiseError;
use shopwise_storage::{CatalogImport, ImportSummary};

use crate::pipeline;

/// Import a catalog document into the configured database.
pub async fn run_import(config: ShopwiseConfig, file: &Path) -> Result<(), ShopwiseError> {
    crate::init_tracing(&config.server.log_level);
    let summary = import_file(&config, file).await?;
    println!(
        "shopwise: imported {} product(s) and {} variant(s) from {}",
        summary.products,
        summary.variants,
        file.display()
    );
    Ok(())
}

pub(crate) async fn import_file(
    config: &ShopwiseConfig,
    file: &Path,
) -> Result<ImportSummary, ShopwiseError> {
    let text = tokio::fs::read_to_string(file).await.map_err(|e| {
        ShopwiseError::Config(format!("failed to read {}: {e}", file.display()))
    })?;
    let catalog = CatalogImport::from_json(&text)?;

    let storage = pipeline::open_storage(config).await?;
    let summary = storage.import_catalog(catalog).await?;
    storage.close().await?;
    Ok(summary)
}
