//! Success responses wrapped in an [`Envelope`].

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
pub use nettrack_core::envelope::Envelope;
use serde::Serialize;

/// A successful response: `200` or `201` with `{ success: true, data }`.
pub struct Reply<T> {
  status: StatusCode,
  data:   T,
}

impl<T> Reply<T> {
  pub fn ok(data: T) -> Self { Self { status: StatusCode::OK, data } }

  pub fn created(data: T) -> Self { Self { status: StatusCode::CREATED, data } }
}

impl<T: Serialize> IntoResponse for Reply<T> {
  fn into_response(self) -> Response {
    (self.status, Json(Envelope::ok(self.data))).into_response()
  }
}
