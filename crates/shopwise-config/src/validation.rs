// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checks serde cannot express, such as port ranges and host syntax.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::ShopwiseConfig;

/// Run every check and report all failures together.
pub fn validate_config(config: &ShopwiseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be between 1 and 65535".to_string());
    }

    if let Some(token) = &config.server.bearer_token
        && token.trim().is_empty()
    {
        fail("server.bearer_token must not be empty when set".to_string());
    }

    if config.provider.timeout_secs == 0 {
        fail("provider.timeout_secs must be at least 1".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.chat.max_results == 0 {
        fail("chat.max_results must be at least 1".to_string());
    }

    let temperature = config.chat.temperature;
    if !(0.0..=1.0).contains(&temperature) {
        fail(format!(
            "chat.temperature must be between 0 and 1, got {temperature}"
        ));
    }

    if config.chat.low_stock_threshold < 1 {
        fail(format!(
            "chat.low_stock_threshold must be at least 1, got {}",
            config.chat.low_stock_threshold
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &ShopwiseConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ShopwiseConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ShopwiseConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn port_zero_fails_validation() {
        let mut config = ShopwiseConfig::default();
        config.server.port = 0;
        assert!(messages(&config).iter().any(|m| m.contains("server.port")));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = ShopwiseConfig::default();
        config.server.host = "not a host!".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("server.host")));
    }

    #[test]
    fn temperature_out_of_range_fails() {
        let mut config = ShopwiseConfig::default();
        config.chat.temperature = 1.5;
        assert!(messages(&config).iter().any(|m| m.contains("chat.temperature")));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = ShopwiseConfig::default();
        config.server.host = " ".to_string();
        config.chat.max_results = 0;
        config.chat.low_stock_threshold = 0;
        config.server.bearer_token = Some(String::new());
        assert_eq!(messages(&config).len(), 4);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = ShopwiseConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        config.storage.database_path = "/tmp/test.db".to_string();
        config.chat.temperature = 1.0;
        config.server.bearer_token = Some("secret".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
