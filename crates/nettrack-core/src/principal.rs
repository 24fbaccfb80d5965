//! The acting user.
//!
//! There is no session layer yet; the server resolves the current user from
//! configuration and hands it to every store call explicitly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the user that owns lists and contacts.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
  pub fn new(id: Uuid) -> Self { Self(id) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl From<Uuid> for UserId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.hyphenated().fmt(f)
  }
}

impl FromStr for UserId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(Uuid::parse_str(s)?)) }
}
