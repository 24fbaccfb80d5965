//! Configuration and startup wiring for the nettrack HTTP server.

use std::sync::Arc;

use anyhow::Context as _;
use nettrack_api::{AppState, StorageStatus};
use nettrack_core::{UserId, store::MembershipPolicy};
use nettrack_store_sqlite::SqliteStore;
use serde::Deserialize;
use uuid::Uuid;

/// The principal used when no `user_id` is configured.
pub const DEFAULT_USER_ID: UserId = UserId(Uuid::from_u128(1));

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `NETTRACK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                   String,
  #[serde(default = "default_port")]
  pub port:                   u16,
  /// A file path, `sqlite://<path>`, or `:memory:`.
  #[serde(default)]
  pub storage_url:            Option<String>,
  /// Privileged backend key. Only its presence is checked.
  #[serde(default)]
  pub service_key:            Option<String>,
  #[serde(default = "default_user_id")]
  pub user_id:                UserId,
  #[serde(default)]
  pub unscoped_list_fallback: bool,
  #[serde(default)]
  pub membership_policy:      MembershipPolicy,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_user_id() -> UserId { DEFAULT_USER_ID }

fn present(value: &Option<String>) -> bool {
  value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl ServerConfig {
  /// Load from an optional TOML file overlaid with `NETTRACK_*` variables.
  pub fn load(file: &std::path::Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("NETTRACK").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// Which storage settings are present. Blank values count as absent.
  pub fn storage_status(&self) -> StorageStatus {
    StorageStatus {
      has_storage_url: present(&self.storage_url),
      has_service_key: present(&self.service_key),
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Open the store and build the API state. Missing storage settings are not
/// fatal: the server starts and its data routes report the problem.
pub async fn build_state(cfg: &ServerConfig) -> anyhow::Result<AppState<SqliteStore>> {
  let storage = cfg.storage_status();
  let url = match &cfg.storage_url {
    Some(url) if storage.missing().is_empty() => expand_tilde(url),
    _ => {
      tracing::warn!(
        missing = ?storage.missing(),
        "storage is not configured; data routes will answer 500"
      );
      return Ok(AppState::unconfigured(storage, cfg.user_id));
    }
  };

  let store = SqliteStore::connect(&url)
    .await
    .with_context(|| format!("failed to open store at {url:?}"))?
    .with_membership_policy(cfg.membership_policy);
  tracing::info!(
    storage = %url,
    policy = ?cfg.membership_policy,
    user = %cfg.user_id,
    "store opened"
  );

  Ok(
    AppState::new(Arc::new(store), cfg.user_id)
      .with_unscoped_list_fallback(cfg.unscoped_list_fallback),
  )
}

/// Expand a leading `~` to the user's home directory, with or without a
/// `sqlite://` scheme in front.
pub fn expand_tilde(url: &str) -> String {
  let (scheme, path) = match url.strip_prefix("sqlite://") {
    Some(rest) => ("sqlite://", rest),
    None => ("", url),
  };
  if let Some(rest) = path.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return format!("{scheme}{home}/{rest}");
  }
  url.to_owned()
}
