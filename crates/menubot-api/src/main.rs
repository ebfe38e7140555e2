//! menubot CLI and REST API entry point.
//!
//! Binary name: `menubot`
//!
//! Parses CLI arguments, loads configuration, then either prints the
//! effective configuration or starts the REST API server.

mod cli;
mod http;
mod state;
mod sweeper;

use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use menubot_infra::config::load_global_config;
use menubot_infra::filesystem::resolve_data_dir;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    menubot_observe::tracing_setup::init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let mut config = load_global_config(&data_dir).await;

    match cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);

            let state = AppState::init(data_dir, config).await?;
            tracing::info!(
                data_dir = %state.data_dir.display(),
                recommendations = state.recommendation_service.is_available(),
                "Application state initialized"
            );

            let shutdown = CancellationToken::new();
            let session_config = &state.config.session;
            let sweeper = session_config.evicts().then(|| {
                sweeper::spawn_session_sweeper(
                    state.sessions().clone(),
                    Duration::from_secs(session_config.sweep_interval_secs.max(1)),
                    shutdown.clone(),
                )
            });

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "Menu API listening");

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            shutdown.cancel();
            if let Some(handle) = sweeper {
                let _ = handle.await;
            }
            tracing::info!("Server stopped");
        }
    }

    menubot_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
