// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of storage, provider, router and chat service from configuration.

use std::sync::Arc;

use shopwise_agent::{ChatService, ConversationRouter, RouterSettings};
use shopwise_anthropic::AnthropicProvider;
use shopwise_config::ShopwiseConfig;
use shopwise_core::{HealthStatus, PluginAdapter, ShopwiseError};
use shopwise_storage::SqliteStorage;
use tracing::{info, warn};

/// The assembled chat pipeline and the storage it runs on.
pub struct Pipeline {
    pub chat: Arc<ChatService>,
    pub storage: Arc<SqliteStorage>,
}

/// Open storage and build the chat service.
pub async fn build(config: &ShopwiseConfig) -> Result<Pipeline, ShopwiseError> {
    let storage = open_storage(config).await?;
    let provider = Arc::new(AnthropicProvider::new(&config.provider)?);

    if let HealthStatus::Degraded(reason) = provider.health_check().await? {
        warn!(reason, "text-generation provider degraded, using rule-based fallbacks");
    }

    let router = ConversationRouter::new(
        provider,
        storage.clone(),
        RouterSettings::from_config(config),
    );
    let chat = Arc::new(ChatService::new(Arc::new(router), storage.clone()));
    info!("chat pipeline ready");

    Ok(Pipeline { chat, storage })
}

/// Open and migrate the configured SQLite database.
pub async fn open_storage(config: &ShopwiseConfig) -> Result<Arc<SqliteStorage>, ShopwiseError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    Ok(storage)
}
