use player_status::aggregator::StatusPoller;
use player_status::cli::{handle_once_command, handle_version_command, parse_args, CliCommand};
use player_status::config::ServiceConfig;
use player_status::server::serve_until;

use color_eyre::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        handle_version_command();
        return Ok(());
    }

    setup_logging();

    let config = ServiceConfig::from_env()?;
    tracing::info!("Polling {}", config.base_url);
    let poller = Arc::new(StatusPoller::from_config(&config));

    match command {
        CliCommand::Once => handle_once_command(&poller).await?,
        _ => serve_until(config.bind_addr, poller, shutdown_signal()).await?,
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: this crate at info).
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("player_status=info,warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
