//! nettrack server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store named by `storage_url`, and serves the JSON API under `/api`.
//!
//! # Demo data
//!
//! ```
//! cargo run -p nettrack-server -- --seed
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use nettrack_server::{ServerConfig, build_state};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "nettrack contact-list API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Upsert the demo lists and contacts for the configured user before
  /// serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;
  let state = build_state(&server_cfg).await?;

  if cli.seed {
    let store = state
      .store
      .as_deref()
      .context("--seed needs storage_url and service_key to be configured")?;
    store
      .seed_demo(server_cfg.user_id)
      .await
      .context("failed to seed demo data")?;
  }

  let app = Router::new()
    .nest("/api", nettrack_api::router(state))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
