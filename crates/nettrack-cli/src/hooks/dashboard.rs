//! [`DashboardHook`] — aggregate counts for the dashboard.

use std::sync::Arc;

use nettrack_core::stats::DashboardStats;

use super::{HookState, Shared};
use crate::api::NetworkApi;

pub struct DashboardHook<A> {
  api:    Arc<A>,
  shared: Shared<DashboardStats>,
}

impl<A: NetworkApi> DashboardHook<A> {
  /// Starts with all-zero stats until the first fetch lands.
  pub fn new(api: Arc<A>) -> Self {
    Self { api, shared: Shared::new("dashboard", DashboardStats::default()) }
  }

  pub fn state(&self) -> HookState<DashboardStats> { self.shared.snapshot() }

  pub async fn mount(&self) { self.fetch().await }

  pub async fn refresh(&self) { self.fetch().await }

  async fn fetch(&self) {
    let token = self.shared.begin();
    let result = self.api.dashboard_stats().await;
    self.shared.finish(token, result);
  }
}
