//! Record Mapper — conversion between storage rows and client view models.
//!
//! Storage uses snake_case column names and nullable columns; the view model
//! is camelCase with defaulted fields. Every conversion here is total and
//! side-effect-free. Derived data that the row does not carry (a contact's
//! list ids, a list's contact count) is passed in explicitly by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  UserId,
  contact::{Contact, DEFAULT_RELATIONSHIP_STRENGTH},
  list::{ContactList, ListColor},
  stats::DashboardStats,
};

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A row of the `contacts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
  pub id:                    Uuid,
  pub user_id:               UserId,
  pub first_name:            String,
  pub last_name:             Option<String>,
  pub company:               Option<String>,
  pub job_title:             Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin_url:          Option<String>,
  pub notes:                 Option<String>,
  pub tags:                  Option<Vec<String>>,
  pub relationship_strength: i64,
  pub created_at:            DateTime<Utc>,
  pub updated_at:            DateTime<Utc>,
}

impl Contact {
  /// Map a stored row to the view model, merging in the list memberships the
  /// caller looked up separately.
  pub fn from_record(record: ContactRecord, list_ids: Vec<Uuid>) -> Self {
    Self {
      id: record.id,
      first_name: record.first_name,
      last_name: record.last_name.unwrap_or_default(),
      company: record.company,
      job_title: record.job_title,
      email: record.email,
      phone: record.phone,
      linkedin: record.linkedin_url,
      notes: record.notes,
      tags: record.tags.unwrap_or_default(),
      relationship_strength: u8::try_from(record.relationship_strength)
        .ok()
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_RELATIONSHIP_STRENGTH),
      created_at: record.created_at,
      updated_at: record.updated_at,
      list_ids,
    }
  }
}

impl ContactRecord {
  /// Inverse of [`Contact::from_record`]. `list_ids` has no column and is
  /// dropped; an empty last name is stored as null.
  pub fn from_view(contact: &Contact, owner: UserId) -> Self {
    Self {
      id:                    contact.id,
      user_id:               owner,
      first_name:            contact.first_name.clone(),
      last_name:             Some(contact.last_name.clone())
        .filter(|s| !s.is_empty()),
      company:               contact.company.clone(),
      job_title:             contact.job_title.clone(),
      email:                 contact.email.clone(),
      phone:                 contact.phone.clone(),
      linkedin_url:          contact.linkedin.clone(),
      notes:                 contact.notes.clone(),
      tags:                  Some(contact.tags.clone()),
      relationship_strength: i64::from(contact.relationship_strength),
      created_at:            contact.created_at,
      updated_at:            contact.updated_at,
    }
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// A row of the `contact_lists` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
  pub id:          Uuid,
  pub user_id:     UserId,
  pub name:        String,
  pub description: Option<String>,
  /// Palette token or legacy hex value.
  pub color:       String,
  pub icon:        Option<String>,
  pub is_favorite: bool,
  pub position:    i64,
  pub tags:        Option<Vec<String>>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl ContactList {
  /// Map a stored row to the view model with the externally computed count.
  pub fn from_record(record: ListRecord, contact_count: u64) -> Self {
    Self {
      id: record.id,
      name: record.name,
      description: record.description,
      color: ListColor::from_storage(&record.color),
      icon: record.icon,
      is_favorite: record.is_favorite,
      position: record.position,
      contact_count,
      created_at: record.created_at,
      updated_at: record.updated_at,
      tags: record.tags.unwrap_or_default(),
    }
  }
}

impl ListRecord {
  /// Inverse of [`ContactList::from_record`]; `contact_count` is dropped and
  /// the color is always written as its token name.
  pub fn from_view(list: &ContactList, owner: UserId) -> Self {
    Self {
      id:          list.id,
      user_id:     owner,
      name:        list.name.clone(),
      description: list.description.clone(),
      color:       list.color.to_string(),
      icon:        list.icon.clone(),
      is_favorite: list.is_favorite,
      position:    list.position,
      tags:        Some(list.tags.clone()),
      created_at:  list.created_at,
      updated_at:  list.updated_at,
    }
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// The single row produced by the dashboard aggregate query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
  pub total_lists:    i64,
  pub total_contacts: i64,
  pub favorite_lists: i64,
  pub recently_added: i64,
}

impl From<StatsRecord> for DashboardStats {
  fn from(r: StatsRecord) -> Self {
    let count = |n: i64| u64::try_from(n).unwrap_or(0);
    Self {
      total_lists:    count(r.total_lists),
      total_contacts: count(r.total_contacts),
      favorite_lists: count(r.favorite_lists),
      recently_added: count(r.recently_added),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn owner() -> UserId { UserId(Uuid::new_v4()) }

  fn full_contact_record(owner: UserId) -> ContactRecord {
    let now = Utc::now();
    ContactRecord {
      id: Uuid::new_v4(),
      user_id: owner,
      first_name: "Sarah".into(),
      last_name: Some("Johnson".into()),
      company: Some("TechCorp Inc".into()),
      job_title: Some("Senior Product Manager".into()),
      email: Some("sarah.johnson@techcorp.com".into()),
      phone: Some("+1 (555) 123-4567".into()),
      linkedin_url: Some("linkedin.com/in/sarahjohnson".into()),
      notes: Some("Follow up about AI".into()),
      tags: Some(vec!["AI".into(), "product".into()]),
      relationship_strength: 4,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn contact_round_trip_preserves_fields() {
    let owner = owner();
    let record = full_contact_record(owner);
    let view = Contact::from_record(record.clone(), vec![]);
    assert_eq!(view.linkedin.as_deref(), Some("linkedin.com/in/sarahjohnson"));
    assert_eq!(ContactRecord::from_view(&view, owner), record);
  }

  #[test]
  fn null_last_name_becomes_empty_string() {
    let owner = owner();
    let record = ContactRecord {
      last_name: None,
      company: None,
      tags: None,
      ..full_contact_record(owner)
    };
    let view = Contact::from_record(record, vec![]);
    assert_eq!(view.last_name, "");
    assert_eq!(view.company, None);
    assert!(view.tags.is_empty());

    let back = ContactRecord::from_view(&view, owner);
    assert_eq!(back.last_name, None);
  }

  #[test]
  fn list_ids_are_explicit() {
    let record = full_contact_record(owner());
    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let view = Contact::from_record(record.clone(), ids.clone());
    assert_eq!(view.list_ids, ids);
    assert!(Contact::from_record(record, vec![]).list_ids.is_empty());
  }

  #[test]
  fn contact_serializes_camel_case() {
    let view = Contact::from_record(full_contact_record(owner()), vec![]);
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["firstName"], "Sarah");
    assert_eq!(json["jobTitle"], "Senior Product Manager");
    assert_eq!(json["linkedin"], "linkedin.com/in/sarahjohnson");
    assert!(json.get("first_name").is_none());
    assert!(json.get("linkedin_url").is_none());
  }

  #[test]
  fn record_ignores_unknown_columns() {
    let owner = owner();
    let mut json = serde_json::to_value(full_contact_record(owner)).unwrap();
    json["sheet_row_number"] = serde_json::json!(12);
    json["website"] = serde_json::json!("https://example.com");
    let record: ContactRecord = serde_json::from_value(json).unwrap();
    assert_eq!(record.first_name, "Sarah");
  }

  #[test]
  fn list_round_trip_drops_only_count() {
    let owner = owner();
    let now = Utc::now();
    let record = ListRecord {
      id: Uuid::new_v4(),
      user_id: owner,
      name: "Startup Meetup".into(),
      description: Some("Local founders".into()),
      color: "green".into(),
      icon: Some("🚀".into()),
      is_favorite: true,
      position: 1,
      tags: Some(vec!["startup".into()]),
      created_at: now,
      updated_at: now,
    };
    let view = ContactList::from_record(record.clone(), 12);
    assert_eq!(view.contact_count, 12);
    assert_eq!(view.color, ListColor::Green);
    assert_eq!(ListRecord::from_view(&view, owner), record);
  }

  #[test]
  fn legacy_hex_color_maps_to_token() {
    let now = Utc::now();
    let record = ListRecord {
      id: Uuid::new_v4(),
      user_id: owner(),
      name: "Alumni".into(),
      description: None,
      color: "#F59E0B".into(),
      icon: None,
      is_favorite: false,
      position: 0,
      tags: None,
      created_at: now,
      updated_at: now,
    };
    let view = ContactList::from_record(record, 0);
    assert_eq!(view.color, ListColor::Orange);
    assert!(view.tags.is_empty());
  }

  #[test]
  fn stats_record_maps_counts() {
    let stats = DashboardStats::from(StatsRecord {
      total_lists:    4,
      total_contacts: 9,
      favorite_lists: 3,
      recently_added: 2,
    });
    assert_eq!(stats.total_contacts, 9);
    assert_eq!(DashboardStats::from(StatsRecord::default()), DashboardStats::default());
  }
}
