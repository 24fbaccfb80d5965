//! Error type for `nettrack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A membership referenced a list that does not exist for the owner.
  #[error("list not found: {0}")]
  ListNotFound(uuid::Uuid),

  #[error("invalid storage url: {0}")]
  InvalidUrl(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
