//! Error types for `nettrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was absent or blank after trimming. The payload is the
  /// human-readable field label, e.g. `"First name"`.
  #[error("{0} is required")]
  Required(&'static str),

  #[error("invalid {field}: {reason}")]
  Invalid {
    field:  &'static str,
    reason: String,
  },
}

impl Error {
  /// Whether this error stems from caller input rather than from the system.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Required(_) | Self::Invalid { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
