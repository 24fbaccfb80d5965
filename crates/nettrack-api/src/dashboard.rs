//! `GET /dashboard/stats`

use nettrack_core::{stats::DashboardStats, store::ContactStore};

use crate::{CurrentUser, Reply, Store, error::ApiError};

/// Aggregate counts for the current user, recomputed on every request.
pub async fn stats<S>(
  Store(store): Store<S>,
  CurrentUser(owner): CurrentUser,
) -> Result<Reply<DashboardStats>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = store
    .dashboard_stats(owner)
    .await
    .map_err(ApiError::store)?;
  Ok(Reply::ok(stats))
}
