//! Contacts — the people a user keeps track of.
//!
//! [`Contact`] is the client-facing view model. New contacts enter the system
//! as a loosely-typed [`NewContact`] (straight off the wire) and must be turned
//! into a [`ContactDraft`] before any store will accept them; that conversion
//! is where validation and normalisation happen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Relationship strength assigned when the caller does not supply one.
pub const DEFAULT_RELATIONSHIP_STRENGTH: u8 = 1;

/// Upper bound of the relationship-strength scale.
pub const MAX_RELATIONSHIP_STRENGTH: u8 = 5;

fn default_strength() -> u8 { DEFAULT_RELATIONSHIP_STRENGTH }

// ─── View model ──────────────────────────────────────────────────────────────

/// A contact as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:                    Uuid,
  pub first_name:            String,
  /// Never null; a contact without a family name carries `""`.
  #[serde(default)]
  pub last_name:             String,
  pub company:               Option<String>,
  pub job_title:             Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  /// Professional-network profile URL.
  pub linkedin:              Option<String>,
  pub notes:                 Option<String>,
  #[serde(default)]
  pub tags:                  Vec<String>,
  #[serde(default = "default_strength")]
  pub relationship_strength: u8,
  pub created_at:            DateTime<Utc>,
  pub updated_at:            DateTime<Utc>,
  /// Lists this contact belongs to. Not stored on the contact itself.
  #[serde(default)]
  pub list_ids:              Vec<Uuid>,
}

impl Contact {
  /// `"First Last"`, or just the first name when there is no last name.
  pub fn display_name(&self) -> String {
    if self.last_name.is_empty() {
      self.first_name.clone()
    } else {
      format!("{} {}", self.first_name, self.last_name)
    }
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Request body for creating a contact. Every field is optional at the type
/// level so a missing `firstName` is reported as a validation failure rather
/// than a deserialisation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub first_name:            Option<String>,
  pub last_name:             Option<String>,
  pub company:               Option<String>,
  pub job_title:             Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  pub notes:                 Option<String>,
  pub tags:                  Option<Vec<String>>,
  pub relationship_strength: Option<u8>,
  #[serde(default)]
  pub list_ids:              Vec<Uuid>,
}

impl NewContact {
  /// Convenience constructor with only a first name set.
  pub fn named(first_name: impl Into<String>) -> Self {
    Self { first_name: Some(first_name.into()), ..Self::default() }
  }

  /// Validate and normalise into a [`ContactDraft`].
  ///
  /// Fails with [`Error::Required`] if the first name is absent or blank.
  /// Optional strings are trimmed; blanks become `None`.
  pub fn into_draft(self) -> Result<ContactDraft> {
    let first_name =
      trimmed(self.first_name).ok_or(Error::Required("First name"))?;

    let relationship_strength = match self.relationship_strength {
      None => DEFAULT_RELATIONSHIP_STRENGTH,
      Some(s) if (1..=MAX_RELATIONSHIP_STRENGTH).contains(&s) => s,
      Some(s) => {
        return Err(Error::Invalid {
          field:  "relationshipStrength",
          reason: format!("{s} is outside 1..={MAX_RELATIONSHIP_STRENGTH}"),
        });
      }
    };

    Ok(ContactDraft {
      first_name,
      last_name: trimmed(self.last_name),
      company: trimmed(self.company),
      job_title: trimmed(self.job_title),
      email: trimmed(self.email),
      phone: trimmed(self.phone),
      linkedin: trimmed(self.linkedin),
      notes: trimmed(self.notes),
      tags: normalize_tags(self.tags),
      relationship_strength,
      list_ids: self.list_ids,
    })
  }
}

/// A validated contact ready to be written. Only obtainable through
/// [`NewContact::into_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ContactDraft {
  pub first_name:            String,
  pub last_name:             Option<String>,
  pub company:               Option<String>,
  pub job_title:             Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin:              Option<String>,
  pub notes:                 Option<String>,
  pub tags:                  Vec<String>,
  pub relationship_strength: u8,
  /// Lists to attach the new contact to. Duplicates are passed through.
  pub list_ids:              Vec<Uuid>,
}

// ─── Normalisation helpers ───────────────────────────────────────────────────

/// Trim `s`; map blank or absent to `None`.
pub(crate) fn trimmed(s: Option<String>) -> Option<String> {
  s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Trim each tag and drop blanks. Absent becomes empty.
pub(crate) fn normalize_tags(tags: Option<Vec<String>>) -> Vec<String> {
  tags
    .unwrap_or_default()
    .into_iter()
    .filter_map(|t| trimmed(Some(t)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_first_name_is_rejected() {
    for name in [None, Some(""), Some("   "), Some("\t\n")] {
      let input = NewContact {
        first_name: name.map(str::to_owned),
        ..NewContact::default()
      };
      let err = input.into_draft().unwrap_err();
      assert!(matches!(err, Error::Required("First name")), "{err}");
      assert_eq!(err.to_string(), "First name is required");
    }
  }

  #[test]
  fn draft_trims_and_nulls_blanks() {
    let input = NewContact {
      first_name: Some("  Ada ".into()),
      last_name: Some("  ".into()),
      company: Some(" Analytical Engines ".into()),
      email: Some("".into()),
      tags: Some(vec![" math ".into(), "".into(), "poetry".into()]),
      ..NewContact::default()
    };
    let draft = input.into_draft().unwrap();
    assert_eq!(draft.first_name, "Ada");
    assert_eq!(draft.last_name, None);
    assert_eq!(draft.company.as_deref(), Some("Analytical Engines"));
    assert_eq!(draft.email, None);
    assert_eq!(draft.tags, vec!["math", "poetry"]);
    assert_eq!(draft.relationship_strength, DEFAULT_RELATIONSHIP_STRENGTH);
  }

  #[test]
  fn out_of_range_strength_is_rejected() {
    let input = NewContact {
      relationship_strength: Some(9),
      ..NewContact::named("Bob")
    };
    assert!(input.into_draft().unwrap_err().is_validation());
  }

  #[test]
  fn new_contact_reads_camel_case_json() {
    let list = Uuid::new_v4();
    let body = serde_json::json!({
      "firstName": "Grace",
      "jobTitle": "Rear Admiral",
      "linkedin": "linkedin.com/in/grace",
      "listIds": [list],
    });
    let input: NewContact = serde_json::from_value(body).unwrap();
    assert_eq!(input.first_name.as_deref(), Some("Grace"));
    assert_eq!(input.job_title.as_deref(), Some("Rear Admiral"));
    assert_eq!(input.list_ids, vec![list]);
    assert_eq!(input.tags, None);
  }
}
