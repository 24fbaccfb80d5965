//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`)
//! so that lexical order matches chronological order. Tag sets are stored as
//! compact JSON arrays. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use nettrack_core::{
  UserId,
  record::{ContactRecord, ListRecord},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_user(id: UserId) -> String { encode_uuid(id.as_uuid()) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: Option<&str>) -> Result<Option<Vec<String>>> {
  s.map(serde_json::from_str).transpose().map_err(Error::from)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str = "c.id, c.user_id, c.first_name, c.last_name, \
   c.company, c.job_title, c.email, c.phone, c.linkedin_url, c.notes, c.tags, \
   c.relationship_strength, c.created_at, c.updated_at";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:                    String,
  pub user_id:               String,
  pub first_name:            String,
  pub last_name:             Option<String>,
  pub company:               Option<String>,
  pub job_title:             Option<String>,
  pub email:                 Option<String>,
  pub phone:                 Option<String>,
  pub linkedin_url:          Option<String>,
  pub notes:                 Option<String>,
  pub tags:                  Option<String>,
  pub relationship_strength: i64,
  pub created_at:            String,
  pub updated_at:            String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                    row.get(0)?,
      user_id:               row.get(1)?,
      first_name:            row.get(2)?,
      last_name:             row.get(3)?,
      company:               row.get(4)?,
      job_title:             row.get(5)?,
      email:                 row.get(6)?,
      phone:                 row.get(7)?,
      linkedin_url:          row.get(8)?,
      notes:                 row.get(9)?,
      tags:                  row.get(10)?,
      relationship_strength: row.get(11)?,
      created_at:            row.get(12)?,
      updated_at:            row.get(13)?,
    })
  }

  pub fn into_record(self) -> Result<ContactRecord> {
    Ok(ContactRecord {
      id:                    decode_uuid(&self.id)?,
      user_id:               UserId(decode_uuid(&self.user_id)?),
      first_name:            self.first_name,
      last_name:             self.last_name,
      company:               self.company,
      job_title:             self.job_title,
      email:                 self.email,
      phone:                 self.phone,
      linkedin_url:          self.linkedin_url,
      notes:                 self.notes,
      tags:                  decode_tags(self.tags.as_deref())?,
      relationship_strength: self.relationship_strength,
      created_at:            decode_dt(&self.created_at)?,
      updated_at:            decode_dt(&self.updated_at)?,
    })
  }
}

/// Column list matching [`RawList::from_row`]; the final column is the
/// computed member count.
pub const LIST_COLUMNS: &str = "l.id, l.user_id, l.name, l.description, \
   l.color, l.icon, l.is_favorite, l.position, l.tags, l.created_at, \
   l.updated_at, \
   (SELECT COUNT(DISTINCT m.contact_id) \
      FROM contact_list_memberships m WHERE m.list_id = l.id) AS contact_count";

/// Raw values read directly from a `contact_lists` row plus its member count.
pub struct RawList {
  pub id:            String,
  pub user_id:       String,
  pub name:          String,
  pub description:   Option<String>,
  pub color:         String,
  pub icon:          Option<String>,
  pub is_favorite:   bool,
  pub position:      i64,
  pub tags:          Option<String>,
  pub created_at:    String,
  pub updated_at:    String,
  pub contact_count: i64,
}

impl RawList {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      user_id:       row.get(1)?,
      name:          row.get(2)?,
      description:   row.get(3)?,
      color:         row.get(4)?,
      icon:          row.get(5)?,
      is_favorite:   row.get(6)?,
      position:      row.get(7)?,
      tags:          row.get(8)?,
      created_at:    row.get(9)?,
      updated_at:    row.get(10)?,
      contact_count: row.get(11)?,
    })
  }

  /// Split into the storage record and the derived count.
  pub fn into_record(self) -> Result<(ListRecord, u64)> {
    let record = ListRecord {
      id:          decode_uuid(&self.id)?,
      user_id:     UserId(decode_uuid(&self.user_id)?),
      name:        self.name,
      description: self.description,
      color:       self.color,
      icon:        self.icon,
      is_favorite: self.is_favorite,
      position:    self.position,
      tags:        decode_tags(self.tags.as_deref())?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    };
    Ok((record, u64::try_from(self.contact_count).unwrap_or(0)))
  }
}
