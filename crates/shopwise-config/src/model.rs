// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shopwise chat engine.
//!
//! Every table denies unknown fields so a misspelled key fails loading
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Shopwise configuration.
///
/// Every table may be omitted; missing tables take their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShopwiseConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// `[storage]` table.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat pipeline tuning.
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// When set, `/v1/*` routes require `Authorization: Bearer <token>`.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// `tracing` level for the `shopwise` target.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Anthropic Messages API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key. `None` leaves the provider disabled, so every turn runs on
    /// the rule-based fallbacks.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification and extraction prompts.
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API base URL, without the `/v1/messages` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transient status codes (429, 500, 503, 529).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_version: default_api_version(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    1
}

/// Catalog database location and journaling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file, created on first use.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("shopwise").join("shopwise.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("shopwise.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Chat pipeline tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Maximum products returned per search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_classification_max_tokens")]
    pub classification_max_tokens: u32,

    #[serde(default = "default_extraction_max_tokens")]
    pub extraction_max_tokens: u32,

    /// Sampling temperature for both prompts, in `[0, 1]`.
    #[serde(default)]
    pub temperature: f32,

    /// Variants with fewer units than this (and more than zero) are flagged
    /// as "Only N left".
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            classification_max_tokens: default_classification_max_tokens(),
            extraction_max_tokens: default_extraction_max_tokens(),
            temperature: 0.0,
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

fn default_max_results() -> usize {
    3
}

fn default_classification_max_tokens() -> u32 {
    10
}

fn default_extraction_max_tokens() -> u32 {
    150
}

fn default_low_stock_threshold() -> i64 {
    5
}
