// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Shopwise configuration system.

use std::io::Write;

use shopwise_config::diagnostic::ConfigError;
use shopwise_config::model::ShopwiseConfig;
use shopwise_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_shopwise_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
bearer_token = "secret"
log_level = "debug"

[provider]
api_key = "sk-ant-123"
model = "claude-sonnet-4-20250514"
api_version = "2023-06-01"
base_url = "http://localhost:9999"
timeout_secs = 5
max_retries = 2

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[chat]
max_results = 5
classification_max_tokens = 12
extraction_max_tokens = 200
temperature = 0.2
low_stock_threshold = 3
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bearer_token.as_deref(), Some("secret"));
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.provider.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
    assert_eq!(config.provider.base_url, "http://localhost:9999");
    assert_eq!(config.provider.timeout_secs, 5);
    assert_eq!(config.provider.max_retries, 2);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.chat.max_results, 5);
    assert_eq!(config.chat.classification_max_tokens, 12);
    assert_eq!(config.chat.extraction_max_tokens, 200);
    assert!((config.chat.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.chat.low_stock_threshold, 3);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert!(config.server.bearer_token.is_none());
    assert_eq!(config.server.log_level, "info");
    assert!(config.provider.api_key.is_none());
    assert_eq!(config.provider.model, "claude-haiku-4-5-20251001");
    assert_eq!(config.provider.timeout_secs, 15);
    assert_eq!(config.provider.max_retries, 1);
    assert!(config.storage.database_path.ends_with("shopwise.db"));
    assert!(config.storage.wal_mode);
    assert_eq!(config.chat.max_results, 3);
    assert_eq!(config.chat.classification_max_tokens, 10);
    assert_eq!(config.chat.extraction_max_tokens, 150);
    assert_eq!(config.chat.temperature, 0.0);
    assert_eq!(config.chat.low_stock_threshold, 5);
}

/// Unknown field in [server] is rejected with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("expected an UnknownKey diagnostic");
    assert!(unknown.0.ends_with("prot"), "key was {}", unknown.0);
    assert_eq!(unknown.1.as_deref(), Some("port"));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let err = load_config_from_str("[telegram]\nbot_token = \"x\"\n")
        .expect_err("unknown section should fail");
    assert!(err.to_string().contains("telegram"));
}

/// Wrong value type surfaces as a diagnostic.
#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(!errors.is_empty());
}

/// Semantic validation runs after deserialization.
#[test]
fn validation_errors_are_returned() {
    let errors = load_and_validate_str("[chat]\nmax_results = 0\ntemperature = 2.0\n").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Dotted overrides (what the env provider produces) win over the file.
#[test]
fn dotted_override_wins() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: ShopwiseConfig = Figment::new()
        .merge(Serialized::defaults(ShopwiseConfig::default()))
        .merge(Toml::string("[provider]\napi_key = \"from-toml\"\n"))
        .merge(("provider.api_key", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.provider.api_key.as_deref(), Some("from-env"));
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: ShopwiseConfig = Figment::new()
        .merge(Serialized::defaults(ShopwiseConfig::default()))
        .merge(Toml::file("/nonexistent/path/shopwise.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.server.port, 3000);
}

/// An explicit file path is loaded and validated.
#[test]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 4100\n\n[storage]\ndatabase_path = \"/tmp/x.db\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.server.port, 4100);
    assert_eq!(config.storage.database_path, "/tmp/x.db");
}
