//! Matches Server
//!
//! Serves the matches REST API and live feed on top of a SQLite database.

use anyhow::Context;
use clap::Parser;
use match_server::config::ServerConfig;
use match_server::notify::BroadcastNotifier;
use match_server::repo::MatchRepo;
use match_server::{build_router, db, ws, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Matches Server - REST API and live feed for matches.
#[derive(Parser)]
#[command(name = "match-server")]
#[command(about = "Serves the matches REST API and live feed")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = ServerConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Port to listen on, overriding the configuration file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.port = port;
    }

    if !config.in_memory() {
        if let Some(dir) = config.database_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating data directory {}", dir.display()))?;
        }
    }

    tracing::info!("Database: {:?}", config.database_path);
    let pool = db::init_db(&config.database_path).context("initializing database")?;
    let mut state = AppState::new(Arc::new(MatchRepo::new(pool)));

    let feed = if config.websocket {
        let feed = ws::create_broadcast(config.broadcast_capacity);
        state = state.with_notifier(Arc::new(BroadcastNotifier::new(feed.clone())));
        Some(feed)
    } else {
        tracing::info!("Live feed disabled");
        None
    };

    let app = build_router(state, feed);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
