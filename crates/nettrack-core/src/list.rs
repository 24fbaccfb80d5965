//! Contact lists — named, colored groupings of contacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use uuid::Uuid;

use crate::{
  Error, Result,
  contact::{normalize_tags, trimmed},
};

/// Icon given to lists created without one.
pub const DEFAULT_LIST_ICON: &str = "📁";

// ─── Color ───────────────────────────────────────────────────────────────────

/// The fixed palette a list can be tagged with.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
  VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ListColor {
  #[default]
  Blue,
  Green,
  Purple,
  Orange,
  Pink,
  Indigo,
  Red,
  Teal,
}

impl ListColor {
  /// Every color, in palette order.
  pub const ALL: &'static [ListColor] = Self::VARIANTS;

  /// The hex swatch for this color.
  pub fn hex(self) -> &'static str {
    match self {
      Self::Blue => "#3B82F6",
      Self::Green => "#10B981",
      Self::Purple => "#8B5CF6",
      Self::Orange => "#F59E0B",
      Self::Pink => "#EC4899",
      Self::Indigo => "#6366F1",
      Self::Red => "#EF4444",
      Self::Teal => "#14B8A6",
    }
  }

  /// Reverse of [`ListColor::hex`], case-insensitive.
  pub fn from_hex(hex: &str) -> Option<Self> {
    Self::ALL
      .iter()
      .copied()
      .find(|c| c.hex().eq_ignore_ascii_case(hex.trim()))
  }

  /// Parse either a token name (`"green"`) or a palette hex (`"#10B981"`).
  pub fn parse(s: &str) -> Option<Self> {
    s.trim().parse().ok().or_else(|| Self::from_hex(s))
  }

  /// Total decoding of a stored color value. Older rows hold hex values;
  /// anything outside the palette falls back to the default color.
  pub fn from_storage(s: &str) -> Self { Self::parse(s).unwrap_or_default() }
}

// ─── View model ──────────────────────────────────────────────────────────────

/// A contact list as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactList {
  pub id:            Uuid,
  pub name:          String,
  pub description:   Option<String>,
  pub color:         ListColor,
  pub icon:          Option<String>,
  pub is_favorite:   bool,
  #[serde(default)]
  pub position:      i64,
  /// Number of distinct contacts in the list; derived, never stored.
  #[serde(default)]
  pub contact_count: u64,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
  #[serde(default)]
  pub tags:          Vec<String>,
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Request body for creating a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
  pub name:        Option<String>,
  pub description: Option<String>,
  /// Token name or palette hex; blank means the default color.
  pub color:       Option<String>,
  pub icon:        Option<String>,
  pub tags:        Option<Vec<String>>,
}

impl NewList {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }

  /// Validate and apply defaults, producing a [`ListDraft`].
  pub fn into_draft(self) -> Result<ListDraft> {
    let name = trimmed(self.name).ok_or(Error::Required("List name"))?;

    let color = match trimmed(self.color) {
      None => ListColor::default(),
      Some(c) => ListColor::parse(&c).ok_or_else(|| Error::Invalid {
        field:  "color",
        reason: format!("{c:?} is not a list color"),
      })?,
    };

    Ok(ListDraft {
      name,
      description: trimmed(self.description),
      color,
      icon: trimmed(self.icon).unwrap_or_else(|| DEFAULT_LIST_ICON.to_owned()),
      tags: normalize_tags(self.tags),
    })
  }
}

/// A validated list ready to be written. New lists always start as
/// non-favorite at position 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ListDraft {
  pub name:        String,
  pub description: Option<String>,
  pub color:       ListColor,
  pub icon:        String,
  pub tags:        Vec<String>,
}
