// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shopwise serve` implementation.

use shopwise_config::ShopwiseConfig;
use shopwise_core::ShopwiseError;
use shopwise_gateway::GatewayState;
use tracing::info;

use crate::pipeline;

/// Build the pipeline and serve the HTTP gateway until SIGINT/SIGTERM.
pub async fn run_serve(config: ShopwiseConfig) -> Result<(), ShopwiseError> {
    crate::init_tracing(&config.server.log_level);
    info!("starting shopwise serve");

    let pipeline = pipeline::build(&config).await?;
    let state = GatewayState::new(pipeline.chat.clone(), config.server.bearer_token.clone());

    shopwise_gateway::start_server(&config.server, state, shutdown_signal()).await?;

    pipeline.storage.close().await?;
    info!("shopwise stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
