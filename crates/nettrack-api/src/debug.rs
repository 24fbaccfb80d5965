//! `GET /debug/config` — reports which storage settings are present without
//! revealing them. Answers even when the server is unconfigured.

use axum::extract::State;
use chrono::{DateTime, Utc};
use nettrack_core::store::ContactStore;
use serde::Serialize;

use crate::{AppState, Reply, StorageStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReport {
  #[serde(flatten)]
  pub storage:   StorageStatus,
  pub timestamp: DateTime<Utc>,
}

pub async fn config<S: ContactStore>(
  State(state): State<AppState<S>>,
) -> Reply<ConfigReport> {
  Reply::ok(ConfigReport { storage: state.storage, timestamp: Utc::now() })
}
