//! The network seam the hooks fetch through.

use std::future::Future;

use anyhow::Result;
use nettrack_core::{
  contact::{Contact, NewContact},
  list::{ContactList, NewList},
  stats::DashboardStats,
  store::ContactQuery,
};

/// Remote operations the client hooks depend on. Implemented by
/// [`crate::client::ApiClient`] over HTTP and by an in-process fake in tests.
pub trait NetworkApi: Send + Sync {
  fn list_lists(&self) -> impl Future<Output = Result<Vec<ContactList>>> + Send + '_;

  fn create_list(
    &self,
    input: NewList,
  ) -> impl Future<Output = Result<ContactList>> + Send + '_;

  fn list_contacts(
    &self,
    query: ContactQuery,
  ) -> impl Future<Output = Result<Vec<Contact>>> + Send + '_;

  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact>> + Send + '_;

  fn dashboard_stats(&self) -> impl Future<Output = Result<DashboardStats>> + Send + '_;
}
