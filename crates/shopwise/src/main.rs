// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopwise - conversational product search for online stores.
//!
//! This is the binary entry point.

mod catalog;
mod chat;
mod pipeline;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopwise_config::{ConfigError, ShopwiseConfig};

/// Shopwise - conversational product search and intent routing.
#[derive(Parser, Debug)]
#[command(name = "shopwise", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Run a single chat turn and print the JSON response.
    Chat(chat::ChatArgs),
    /// Manage the product catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Import a store and its products from a JSON document.
    Import {
        /// Path to the catalog JSON file.
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate configuration, reporting every problem found.
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<ShopwiseConfig, Vec<ConfigError>> {
    match path {
        Some(path) => shopwise_config::load_and_validate_path(path),
        None => shopwise_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            shopwise_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Chat(args)) => chat::run_chat(config, args).await,
        Some(Commands::Catalog {
            action: CatalogCommand::Import { file },
        }) => catalog::run_import(config, &file).await,
        Some(Commands::Config {
            action: ConfigCommand::Check,
        }) => {
            print_config_summary(&config);
            Ok(())
        }
        None => {
            println!("shopwise: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("shopwise: {e}");
        std::process::exit(1);
    }
}

fn print_config_summary(config: &ShopwiseConfig) {
    println!("shopwise: configuration is valid");
    println!("  server:   {}:{}", config.server.host, config.server.port);
    println!(
        "  auth:     {}",
        if config.server.bearer_token.is_some() {
            "bearer token"
        } else {
            "disabled"
        }
    );
    println!(
        "  provider: {} ({})",
        config.provider.model,
        if config.provider.api_key.is_some() {
            "api key set"
        } else {
            "no api key, heuristics only"
        }
    );
    println!("  storage:  {}", config.storage.database_path);
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` overrides the configured level when set.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shopwise={log_level},warn")));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_command() {
        let cli = Cli::try_parse_from([
            "shopwise",
            "chat",
            "--workspace",
            "w1",
            "--session",
            "s1",
            "--chatbot",
            "c1",
            "do you have rings?",
        ])
        .unwrap();
        let Some(Commands::Chat(args)) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(args.workspace, "w1");
        assert_eq!(args.message, "do you have rings?");
        assert!(args.phone.is_none());
    }

    #[test]
    fn parses_catalog_import_with_global_config() {
        let cli = Cli::try_parse_from([
            "shopwise",
            "catalog",
            "import",
            "catalog.json",
            "--config",
            "shop.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Catalog {
                action: CatalogCommand::Import { .. }
            })
        ));
    }

    #[test]
    fn chat_requires_identifiers() {
        assert!(Cli::try_parse_from(["shopwise", "chat", "hello"]).is_err());
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = shopwise_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.server.port, 3000);
    }
}
