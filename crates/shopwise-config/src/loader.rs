// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shopwise.toml` > `~/.config/shopwise/shopwise.toml`
//! > `/etc/shopwise/shopwise.toml`, with environment variable overrides via the
//! `SHOPWISE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShopwiseConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG: &str = "/etc/shopwise/shopwise.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG: &str = "shopwise.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SHOPWISE_";

/// Top-level sections that environment variables can address.
const ENV_SECTIONS: &[&str] = &["server", "provider", "storage", "chat"];

/// `~/.config/shopwise/shopwise.toml`, when a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shopwise").join("shopwise.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shopwise/shopwise.toml` (system-wide)
/// 3. `~/.config/shopwise/shopwise.toml` (user XDG config)
/// 4. `./shopwise.toml` (local directory)
/// 5. `SHOPWISE_*` environment variables
pub fn load_config() -> Result<ShopwiseConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the compiled defaults.
///
/// No files and no environment variables are consulted.
pub fn load_config_from_str(toml_content: &str) -> Result<ShopwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShopwiseConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShopwiseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShopwiseConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShopwiseConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Map a prefix-stripped, lower-cased env key onto a config path.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `provider_api_key` maps to `provider.api_key`, not `provider.api.key`.
pub fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores themselves.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| map_env_key(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_at_section_only() {
        assert_eq!(map_env_key("provider_api_key"), "provider.api_key");
        assert_eq!(map_env_key("server_bearer_token"), "server.bearer_token");
        assert_eq!(map_env_key("chat_low_stock_threshold"), "chat.low_stock_threshold");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
    }

    #[test]
    fn unknown_sections_pass_through() {
        assert_eq!(map_env_key("telemetry_enabled"), "telemetry_enabled");
        assert_eq!(map_env_key("server"), "server");
    }

    #[test]
    fn user_config_lives_under_shopwise() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("shopwise/shopwise.toml"));
        }
    }
}
