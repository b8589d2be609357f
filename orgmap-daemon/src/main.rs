//! OrgMap Daemon - organization graph API.
//!
//! A single Rust binary that:
//! - Queries the Notion circles and people databases on every request
//! - Serves the normalized graph (nodes + edges) as JSON for the map frontend
//! - Reports reachability of Notion on a health endpoint

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orgmap_daemon::config::{OrgMapConfig, DEFAULT_CONFIG_FILE};
use orgmap_daemon::notion::NotionClient;
use orgmap_daemon::server::{create_router, AppState};

/// OrgMap organization graph daemon
#[derive(Parser, Debug)]
#[command(name = "orgmap-daemon")]
#[command(about = "Serves the VdL Farm organization graph built from Notion")]
#[command(version)]
struct Cli {
    /// HTTP port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    notion_api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = OrgMapConfig::load(&cli.config);
    info!("Configuration: {:?}", cli.config);

    let api_key = cli.notion_api_key.filter(|key| !key.trim().is_empty());
    if api_key.is_none() {
        warn!("NOTION_API_KEY not set! Graph and health requests will be rejected by Notion.");
    }

    let source = NotionClient::new(config.notion.clone(), api_key)?;
    let state = AppState::new(
        Arc::new(source),
        config.graph_options(),
        config.server.cache_max_age,
    );

    let router = create_router(state, &config.server.allowed_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("OrgMap API running on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
