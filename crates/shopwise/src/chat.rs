// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shopwise chat` implementation: one turn through the full pipeline.

use clap::Args;
use shopwise_config::ShopwiseConfig;
use shopwise_core::ShopwiseError;
use shopwise_core::types::{ChatRequest, ChatResponse};

use crate::pipeline;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Workspace whose catalog is searched.
    #[arg(long)]
    pub workspace: String,
    /// Session identifier.
    #[arg(long)]
    pub session: String,
    /// Chatbot identifier.
    #[arg(long)]
    pub chatbot: String,
    /// Optional phone number logged with the message.
    #[arg(long)]
    pub phone: Option<String>,
    /// The shopper's message.
    pub message: String,
}

impl From<ChatArgs> for ChatRequest {
    fn from(args: ChatArgs) -> Self {
        ChatRequest {
            message: Some(args.message),
            session_id: Some(args.session),
            chatbot_id: Some(args.chatbot),
            workspace_id: Some(args.workspace),
            phone: args.phone,
        }
    }
}

pub async fn run_chat(config: ShopwiseConfig, args: ChatArgs) -> Result<(), ShopwiseError> {
    crate::init_tracing(&config.server.log_level);
    let response = chat_once(&config, args).await?;
    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| ShopwiseError::Internal(format!("failed to encode response: {e}")))?;
    println!("{json}");
    Ok(())
}

pub(crate) async fn chat_once(
    config: &ShopwiseConfig,
    args: ChatArgs,
) -> Result<ChatResponse, ShopwiseError> {
    let pipeline = pipeline::build(config).await?;
    let response = pipeline.chat.handle(args.into()).await?;
    pipeline.storage.close().await?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopwise_core::types::{LastIntent, ReplyType};

    const CATALOG: &str = r#"{
        "store": { "id": "s1", "workspaceId": "w1", "name": "Jewels", "domain": "jewels.example.com" },
        "products": [
            { "id": "p1", "title": "Gold Ring", "handle": "gold-ring",
              "variants": [ { "id": "v1", "name": "Default", "price": 49.0, "stock": 3 } ] },
            { "id": "p2", "title": "Silver Ring", "handle": "silver-ring",
              "variants": [ { "id": "v2", "name": "Default", "price": 29.0, "stock": 0 } ] }
        ]
    }"#;

    fn offline_config(dir: &tempfile::TempDir) -> ShopwiseConfig {
        let db = dir.path().join("shop.db");
        shopwise_config::load_and_validate_str(&format!(
            "[storage]\ndatabase_path = {:?}\n",
            db.to_string_lossy()
        ))
        .unwrap()
    }

    fn args(message: &str) -> ChatArgs {
        ChatArgs {
            workspace: "w1".into(),
            session: "s1".into(),
            chatbot: "c1".into(),
            phone: None,
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn imported_catalog_answers_stock_query_without_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = offline_config(&dir);
        // Any key picked up from the environment hits a closed port and
        // falls back to heuristics.
        config.provider.api_key = None;
        config.provider.base_url = "http://127.0.0.1:9".into();
        config.provider.timeout_secs = 1;
        config.provider.max_retries = 0;

        let file = dir.path().join("catalog.json");
        std::fs::write(&file, CATALOG).unwrap();
        let summary = crate::catalog::import_file(&config, &file).await.unwrap();
        assert_eq!((summary.products, summary.variants), (2, 2));

        let response = chat_once(&config, args("do you have rings in stock?"))
            .await
            .unwrap();
        assert_eq!(response.reply.kind, ReplyType::ProductResults);
        assert_eq!(response.context.last_intent, Some(LastIntent::StockQuery));
        let products = response.reply.products.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Gold Ring");
        assert_eq!(
            products[0].url.as_deref(),
            Some("https://jewels.example.com/products/gold-ring")
        );
    }
}
