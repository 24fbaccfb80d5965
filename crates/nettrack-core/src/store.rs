//! The `ContactStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `nettrack-store-sqlite`).
//! Higher layers (`nettrack-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  UserId,
  contact::{Contact, ContactDraft},
  list::{ContactList, ListDraft},
  stats::DashboardStats,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ContactStore::search_contacts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
  /// Case-insensitive substring matched against name, company, job title
  /// and email. Blank means no filter.
  pub text:      Option<String>,
  /// Restrict to members of this list.
  pub list_id:   Option<Uuid>,
  /// 1-based page number.
  pub page:      Option<u32>,
  pub page_size: Option<u32>,
}

impl ContactQuery {
  pub const DEFAULT_PAGE_SIZE: u32 = 50;
  pub const MAX_PAGE_SIZE: u32 = 500;

  /// A query with only a text filter.
  pub fn text(text: impl Into<String>) -> Self {
    Self { text: Some(text.into()), ..Self::default() }
  }

  /// The trimmed search needle, or `None` if no text filter applies.
  pub fn needle(&self) -> Option<&str> {
    self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
  }

  /// Effective page number; anything below 1 is treated as 1.
  pub fn page(&self) -> u32 { self.page.unwrap_or(1).max(1) }

  /// Effective page size, clamped to `1..=MAX_PAGE_SIZE`.
  pub fn page_size(&self) -> u32 {
    self
      .page_size
      .unwrap_or(Self::DEFAULT_PAGE_SIZE)
      .clamp(1, Self::MAX_PAGE_SIZE)
  }

  /// Number of rows to skip: `(page - 1) * page_size`.
  pub fn offset(&self) -> u64 {
    u64::from(self.page() - 1) * u64::from(self.page_size())
  }
}

// ─── Write policy ────────────────────────────────────────────────────────────

/// How [`ContactStore::create_contact`] treats the membership rows written
/// alongside a new contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
  /// Insert the contact, then the memberships. A membership failure is
  /// logged and swallowed; the contact stays.
  #[default]
  BestEffort,
  /// Contact and memberships commit together or not at all.
  Atomic,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a nettrack storage backend.
///
/// Every operation is scoped to an owning [`UserId`] supplied by the caller.
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lists ─────────────────────────────────────────────────────────────

  /// All lists owned by `owner`, ordered by position, with member counts.
  fn list_lists(
    &self,
    owner: UserId,
  ) -> impl Future<Output = Result<Vec<ContactList>, Self::Error>> + Send + '_;

  /// All lists regardless of owner. Development use only.
  fn list_all_lists(
    &self,
  ) -> impl Future<Output = Result<Vec<ContactList>, Self::Error>> + Send + '_;

  /// Persist a new list. The returned list has a contact count of 0.
  fn create_list(
    &self,
    owner: UserId,
    draft: ListDraft,
  ) -> impl Future<Output = Result<ContactList, Self::Error>> + Send + '_;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Filtered, paginated contacts ordered by first name. An empty result is
  /// success.
  fn search_contacts<'a>(
    &'a self,
    owner: UserId,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;

  /// A single contact with its list ids. Returns `None` if it does not exist
  /// or belongs to another user.
  fn get_contact(
    &self,
    owner: UserId,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact and attach it to `draft.list_ids` according to
  /// the store's [`MembershipPolicy`].
  fn create_contact(
    &self,
    owner: UserId,
    draft: ContactDraft,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  // ── Memberships ───────────────────────────────────────────────────────

  /// Add `contact_id` to `list_id`. Returns `false` if either does not exist
  /// for `owner`.
  fn add_to_list(
    &self,
    owner: UserId,
    list_id: Uuid,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove every membership of `contact_id` in `list_id`. Returns `false`
  /// if there was none.
  fn remove_from_list(
    &self,
    owner: UserId,
    list_id: Uuid,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Aggregates ────────────────────────────────────────────────────────

  /// Summary counts for the dashboard; recomputed on every call.
  fn dashboard_stats(
    &self,
    owner: UserId,
  ) -> impl Future<Output = Result<DashboardStats, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pagination_defaults() {
    let q = ContactQuery::default();
    assert_eq!(q.page(), 1);
    assert_eq!(q.page_size(), 50);
    assert_eq!(q.offset(), 0);
  }

  #[test]
  fn pagination_window() {
    let q = ContactQuery { page: Some(2), page_size: Some(10), ..Default::default() };
    assert_eq!(q.offset(), 10);
  }

  #[test]
  fn pagination_clamps() {
    let q = ContactQuery { page: Some(0), page_size: Some(0), ..Default::default() };
    assert_eq!(q.page(), 1);
    assert_eq!(q.page_size(), 1);
    let q = ContactQuery { page_size: Some(10_000), ..Default::default() };
    assert_eq!(q.page_size(), ContactQuery::MAX_PAGE_SIZE);
  }

  #[test]
  fn blank_text_is_no_filter() {
    assert_eq!(ContactQuery::text("").needle(), None);
    assert_eq!(ContactQuery::text("   ").needle(), None);
    assert_eq!(ContactQuery::text(" ann ").needle(), Some("ann"));
    assert_eq!(ContactQuery::default().needle(), None);
  }

  #[test]
  fn policy_reads_snake_case() {
    let p: MembershipPolicy = serde_json::from_str("\"best_effort\"").unwrap();
    assert_eq!(p, MembershipPolicy::BestEffort);
    let p: MembershipPolicy = serde_json::from_str("\"atomic\"").unwrap();
    assert_eq!(p, MembershipPolicy::Atomic);
  }
}
