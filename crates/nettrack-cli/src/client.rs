//! Async HTTP client wrapping the nettrack JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use nettrack_core::{
  contact::{Contact, NewContact},
  envelope::Envelope,
  list::{ContactList, NewList},
  stats::DashboardStats,
  store::ContactQuery,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::NetworkApi;

/// Connection settings for the nettrack API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the nettrack JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// Query-string pairs for `GET /contacts`. Unset filters are omitted.
pub fn contact_params(query: &ContactQuery) -> Vec<(&'static str, String)> {
  let mut params = Vec::new();
  if let Some(needle) = query.needle() {
    params.push(("q", needle.to_owned()));
  }
  if let Some(list_id) = query.list_id {
    params.push(("list_id", list_id.to_string()));
  }
  if let Some(page) = query.page {
    params.push(("page", page.to_string()));
  }
  if let Some(limit) = query.page_size {
    params.push(("limit", limit.to_string()));
  }
  params
}

fn contact_path(id: Uuid) -> String { format!("/contacts/{id}") }

fn membership_path(list_id: Uuid, contact_id: Uuid) -> String {
  format!("/lists/{list_id}/contacts/{contact_id}")
}

/// Read an [`Envelope`] body, surfacing the server's error message on
/// failure.
async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  let status = resp.status();
  let envelope: Envelope<T> = resp
    .json()
    .await
    .with_context(|| format!("{what} → {status}: body is not a JSON envelope"))?;
  envelope
    .into_result()
    .map_err(|message| anyhow!("{what} → {status}: {message}"))
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Lists ─────────────────────────────────────────────────────────────────

  /// `GET /api/lists`
  pub async fn list_lists(&self) -> Result<Vec<ContactList>> {
    let resp = self
      .client
      .get(self.url("/lists"))
      .send()
      .await
      .context("GET /lists failed")?;
    decode(resp, "GET /lists").await
  }

  /// `POST /api/lists`
  pub async fn create_list(&self, input: &NewList) -> Result<ContactList> {
    let resp = self
      .client
      .post(self.url("/lists"))
      .json(input)
      .send()
      .await
      .context("POST /lists failed")?;
    decode(resp, "POST /lists").await
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  /// `GET /api/contacts?q=&list_id=&page=&limit=`
  pub async fn list_contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .query(&contact_params(query))
      .send()
      .await
      .context("GET /contacts failed")?;
    decode(resp, "GET /contacts").await
  }

  /// `GET /api/contacts/{id}`
  pub async fn get_contact(&self, id: Uuid) -> Result<Contact> {
    let path = contact_path(id);
    let resp = self
      .client
      .get(self.url(&path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(resp, &format!("GET {path}")).await
  }

  /// `POST /api/contacts`
  pub async fn create_contact(&self, input: &NewContact) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(input)
      .send()
      .await
      .context("POST /contacts failed")?;
    decode(resp, "POST /contacts").await
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  /// `PUT /api/lists/{list_id}/contacts/{contact_id}`
  pub async fn add_to_list(&self, list_id: Uuid, contact_id: Uuid) -> Result<bool> {
    let path = membership_path(list_id, contact_id);
    let resp = self
      .client
      .put(self.url(&path))
      .send()
      .await
      .with_context(|| format!("PUT {path} failed"))?;
    decode(resp, &format!("PUT {path}")).await
  }

  /// `DELETE /api/lists/{list_id}/contacts/{contact_id}`
  pub async fn remove_from_list(&self, list_id: Uuid, contact_id: Uuid) -> Result<bool> {
    let path = membership_path(list_id, contact_id);
    let resp = self
      .client
      .delete(self.url(&path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    decode(resp, &format!("DELETE {path}")).await
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  /// `GET /api/dashboard/stats`
  pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
    let resp = self
      .client
      .get(self.url("/dashboard/stats"))
      .send()
      .await
      .context("GET /dashboard/stats failed")?;
    decode(resp, "GET /dashboard/stats").await
  }
}

impl NetworkApi for ApiClient {
  async fn list_lists(&self) -> Result<Vec<ContactList>> { ApiClient::list_lists(self).await }

  async fn create_list(&self, input: NewList) -> Result<ContactList> {
    ApiClient::create_list(self, &input).await
  }

  async fn list_contacts(&self, query: ContactQuery) -> Result<Vec<Contact>> {
    ApiClient::list_contacts(self, &query).await
  }

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    ApiClient::create_contact(self, &input).await
  }

  async fn dashboard_stats(&self) -> Result<DashboardStats> {
    ApiClient::dashboard_stats(self).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_query_sends_no_params() {
    assert!(contact_params(&ContactQuery::default()).is_empty());
    assert!(contact_params(&ContactQuery::text("   ")).is_empty());
  }

  #[test]
  fn all_filters_are_sent() {
    let list_id = Uuid::new_v4();
    let query = ContactQuery {
      text:      Some(" ann ".into()),
      list_id:   Some(list_id),
      page:      Some(2),
      page_size: Some(10),
    };
    assert_eq!(contact_params(&query), vec![
      ("q", "ann".to_owned()),
      ("list_id", list_id.to_string()),
      ("page", "2".to_owned()),
      ("limit", "10".to_owned()),
    ]);
  }

  #[test]
  fn paths_carry_real_ids() {
    let (list_id, contact_id) = (Uuid::new_v4(), Uuid::new_v4());
    assert_eq!(contact_path(contact_id), format!("/contacts/{contact_id}"));
    let path = membership_path(list_id, contact_id);
    assert_eq!(path, format!("/lists/{list_id}/contacts/{contact_id}"));
    assert!(!path.contains('{'));
  }

  #[test]
  fn url_joins_base_and_api_prefix() {
    let client = ApiClient::new(ApiConfig { base_url: "http://localhost:3000/".into() })
      .unwrap();
    assert_eq!(client.url("/lists"), "http://localhost:3000/api/lists");
  }
}
