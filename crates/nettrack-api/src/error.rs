//! API error type and [`axum::response::IntoResponse`] implementation.

use std::any::Any;

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use nettrack_core::envelope::Envelope;
use thiserror::Error;

/// Message sent for panics and other failures whose detail stays server-side.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Caller input failed validation; nothing was written.
  #[error("{0}")]
  Validation(#[from] nettrack_core::Error),

  /// The server was started without the storage settings named here.
  #[error("Missing storage configuration: {}", .0.join(", "))]
  Configuration(Vec<&'static str>),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal server error")]
  Internal,
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Configuration(_) | Self::Store(_) | Self::Internal => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      Self::Validation(e) => e.to_string(),
      Self::Configuration(_) => {
        tracing::error!(error = %self, "request refused");
        self.to_string()
      }
      Self::NotFound(m) | Self::BadRequest(m) => m.clone(),
      Self::Store(e) => {
        tracing::error!(error = %e, "storage failure");
        e.to_string()
      }
      Self::Internal => INTERNAL_MESSAGE.to_owned(),
    };
    (status, Json(Envelope::<()>::failure(message))).into_response()
  }
}

/// Response for a handler that panicked. The payload is logged, never sent.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
  let detail = payload
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| payload.downcast_ref::<&str>().copied())
    .unwrap_or("non-string panic payload");
  tracing::error!(panic = detail, "handler panicked");
  ApiError::Internal.into_response()
}
