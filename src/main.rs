//! LeetBro API Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from a TOML config file with environment variable overrides:
//! - `LEETBRO_DATA_DIR`: Data directory
//! - `LEETBRO_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `LEETBRO_API_PORT`: Port to listen on (default: 8080)
//! - `LEETBRO_STATS_URL`: Base URL of the LeetCode stats API
//! - `LEETBRO_SYNC_ENABLED`: Enable background leaderboard refresh
//! - `RUST_LOG`: Log filter (overrides the configured level)

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leetbro::api::{serve, ApiConfig, AppState};
use leetbro::config::{generate_default_config, Config, LoggingConfig};
use leetbro::leetcode::{StatsClient, StatsClientConfig};
use leetbro::store::Store;
use leetbro::sync::{SyncConfig, SyncService};
use leetbro::websocket::{ConnectionHub, HubConfig};

#[derive(Parser)]
#[command(name = "leetbro")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LeetCode progress tracker with a weighted-points leaderboard and leagues")]
struct Cli {
    /// Path to a TOML config file (default: standard config locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use an in-memory store instead of the on-disk database
    #[arg(long)]
    ephemeral: bool,

    /// Print a default config file to stdout and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting LeetBro API server v{}", env!("CARGO_PKG_VERSION"));

    // Open the store
    let store = if cli.ephemeral {
        tracing::info!("Using in-memory store (--ephemeral)");
        Arc::new(Store::open_in_memory().context("failed to open in-memory store")?)
    } else {
        tracing::info!("Data directory: {}", config.store.data_dir);
        Arc::new(
            Store::open(Path::new(&config.store.data_dir))
                .context("failed to open store")?,
        )
    };

    // Stats client for the LeetCode stats API
    let stats = Arc::new(StatsClient::new(StatsClientConfig {
        base_url: config.leetcode.stats_url.clone(),
        request_timeout_ms: config.leetcode.request_timeout_ms,
    }));

    // WebSocket hub for live updates
    let hub = Arc::new(ConnectionHub::new(HubConfig::default()));

    // Sync service
    let sync = Arc::new(SyncService::new(
        Arc::clone(&store),
        stats,
        Arc::clone(&hub),
        SyncConfig {
            refresh_interval_minutes: config.sync.refresh_interval_minutes,
            background_enabled: config.sync.background_enabled,
        },
    ));

    if sync.is_enabled() {
        Arc::clone(&sync).start_background_sync();
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        request_timeout_ms: config.api.request_timeout_secs * 1000,
        ..Default::default()
    };

    let state = AppState::new(store, sync, hub, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("LeetBro API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config.
///
/// `RUST_LOG` takes precedence over the configured level when set.
fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "leetbro={},tower_http=debug",
            config.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
