//! JSON REST API for nettrack.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`]. Every response
//! is wrapped in an [`Envelope`]; every data route acts on behalf of the
//! [`UserId`] injected through [`AppState`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", nettrack_api::router(state))
//! ```

pub mod contacts;
pub mod dashboard;
pub mod debug;
pub mod envelope;
pub mod error;
pub mod lists;
pub mod memberships;

use std::sync::Arc;

use axum::{
  Router,
  extract::{FromRequest, FromRequestParts},
  http::request::Parts,
  routing::{get, put},
};
use nettrack_core::{UserId, store::ContactStore};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;

pub use envelope::{Envelope, Reply};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Which storage settings the server was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStatus {
  pub has_storage_url: bool,
  pub has_service_key: bool,
}

impl StorageStatus {
  pub const CONFIGURED: Self = Self { has_storage_url: true, has_service_key: true };

  /// Names of the settings that are absent, in configuration-file spelling.
  pub fn missing(&self) -> Vec<&'static str> {
    let mut names = Vec::new();
    if !self.has_storage_url {
      names.push("storage_url");
    }
    if !self.has_service_key {
      names.push("service_key");
    }
    names
  }
}

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  /// `None` when the server started without storage configuration.
  pub store:                  Option<Arc<S>>,
  pub storage:                StorageStatus,
  /// The principal every request acts as.
  pub user:                   UserId,
  /// Serve every user's lists when the current user has none. Development
  /// only.
  pub unscoped_list_fallback: bool,
}

impl<S: ContactStore> AppState<S> {
  pub fn new(store: Arc<S>, user: UserId) -> Self {
    Self {
      store: Some(store),
      storage: StorageStatus::CONFIGURED,
      user,
      unscoped_list_fallback: false,
    }
  }

  /// State for a server missing storage settings: every data route answers
  /// with a configuration error.
  pub fn unconfigured(storage: StorageStatus, user: UserId) -> Self {
    Self { store: None, storage, user, unscoped_list_fallback: false }
  }

  pub fn with_unscoped_list_fallback(mut self, enabled: bool) -> Self {
    self.unscoped_list_fallback = enabled;
    self
  }
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// The configured store. Rejects with [`ApiError::Configuration`] when the
/// server has none.
pub struct Store<S>(pub Arc<S>);

impl<S: ContactStore> FromRequestParts<AppState<S>> for Store<S> {
  type Rejection = ApiError;

  async fn from_request_parts(
    _parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match &state.store {
      Some(store) => Ok(Store(Arc::clone(store))),
      None => Err(ApiError::Configuration(state.storage.missing())),
    }
  }
}

/// The principal the request acts as.
pub struct CurrentUser(pub UserId);

impl<S: ContactStore> FromRequestParts<AppState<S>> for CurrentUser {
  type Rejection = ApiError;

  async fn from_request_parts(
    _parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(CurrentUser(state.user))
  }
}

/// [`axum::Json`] whose rejection is reported through the envelope as a 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// [`axum::extract::Query`] with an enveloped 400 on malformed parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// [`axum::extract::Path`] with an enveloped 400 on malformed segments.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Lists
    .route("/lists", get(lists::list::<S>).post(lists::create::<S>))
    .route(
      "/lists/{list_id}/contacts/{contact_id}",
      put(memberships::add::<S>).delete(memberships::remove::<S>),
    )
    // Contacts
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/{id}", get(contacts::get_one::<S>))
    // Dashboard
    .route("/dashboard/stats", get(dashboard::stats::<S>))
    // Diagnostics
    .route("/debug/config", get(debug::config::<S>))
    .layer(CatchPanicLayer::custom(error::panic_response))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
