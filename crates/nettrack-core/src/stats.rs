//! Dashboard summary counts.

use serde::{Deserialize, Serialize};

/// How far back "recently added" looks.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Ephemeral aggregate over a user's lists and contacts; never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
  pub total_lists:    u64,
  pub total_contacts: u64,
  pub favorite_lists: u64,
  /// Contacts created within the last [`RECENT_WINDOW_DAYS`] days.
  pub recently_added: u64,
}
