//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::{collections::HashMap, path::Path};

use chrono::{Duration, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use nettrack_core::{
  UserId,
  contact::{Contact, ContactDraft},
  list::{ContactList, ListDraft},
  record::{ContactRecord, ListRecord, StatsRecord},
  stats::{DashboardStats, RECENT_WINDOW_DAYS},
  store::{ContactQuery, ContactStore, MembershipPolicy},
};

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, LIST_COLUMNS, RawContact, RawList, decode_uuid, encode_dt,
    encode_tags, encode_user, encode_uuid,
  },
  query::{contacts_query, memberships_query, register_fold},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A nettrack store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  policy:          MembershipPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  /// Open a store from a storage URL: a bare path, `sqlite://<path>`, or
  /// `:memory:`.
  pub async fn connect(url: &str) -> Result<Self> {
    let url = url.trim();
    let path = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);

    match path {
      "" => Err(Error::InvalidUrl(url.to_owned())),
      ":memory:" => Self::open_in_memory().await,
      path => Self::open(path).await,
    }
  }

  /// Choose how contact creation treats its membership rows.
  pub fn with_membership_policy(mut self, policy: MembershipPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn membership_policy(&self) -> MembershipPolicy { self.policy }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        register_fold(conn)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, policy: MembershipPolicy::default() })
  }

  async fn query_lists(&self, owner: Option<UserId>) -> Result<Vec<ContactList>> {
    let owner_str = owner.map(encode_user);

    let raws: Vec<RawList> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(owner) = owner_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM contact_lists l
             WHERE l.user_id = ?1
             ORDER BY l.position, l.created_at, l.id"
          ))?;
          stmt
            .query_map(rusqlite::params![owner], RawList::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM contact_lists l
             ORDER BY l.position, l.created_at, l.id"
          ))?;
          stmt
            .query_map([], RawList::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| -> Result<ContactList> {
        let (record, count) = raw.into_record()?;
        Ok(ContactList::from_record(record, count))
      })
      .collect()
  }
}

// ─── Row helpers (run on the connection thread) ──────────────────────────────

/// A contact row with every column already encoded for SQLite.
struct ContactRow {
  id:                    String,
  user_id:               String,
  first_name:            String,
  last_name:             Option<String>,
  company:               Option<String>,
  job_title:             Option<String>,
  email:                 Option<String>,
  phone:                 Option<String>,
  linkedin_url:          Option<String>,
  notes:                 Option<String>,
  tags:                  String,
  relationship_strength: i64,
  created_at:            String,
  updated_at:            String,
}

impl ContactRow {
  fn encode(record: &ContactRecord) -> Result<Self> {
    Ok(Self {
      id:                    encode_uuid(record.id),
      user_id:               encode_user(record.user_id),
      first_name:            record.first_name.clone(),
      last_name:             record.last_name.clone(),
      company:               record.company.clone(),
      job_title:             record.job_title.clone(),
      email:                 record.email.clone(),
      phone:                 record.phone.clone(),
      linkedin_url:          record.linkedin_url.clone(),
      notes:                 record.notes.clone(),
      tags:                  encode_tags(record.tags.as_deref().unwrap_or_default())?,
      relationship_strength: record.relationship_strength,
      created_at:            encode_dt(record.created_at),
      updated_at:            encode_dt(record.updated_at),
    })
  }

  fn insert(&self, conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO contacts (
         id, user_id, first_name, last_name, company, job_title,
         email, phone, linkedin_url, notes, tags,
         relationship_strength, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
      rusqlite::params![
        self.id,
        self.user_id,
        self.first_name,
        self.last_name,
        self.company,
        self.job_title,
        self.email,
        self.phone,
        self.linkedin_url,
        self.notes,
        self.tags,
        self.relationship_strength,
        self.created_at,
        self.updated_at,
      ],
    )?;
    Ok(())
  }
}

/// Insert one membership row per list id at position 0. Every list must
/// exist and belong to `owner`; the first that does not aborts the batch.
fn insert_memberships(
  conn: &rusqlite::Connection,
  owner: &str,
  contact_id: &str,
  list_ids: &[Uuid],
  added_at: &str,
) -> Result<()> {
  for &list_id in list_ids {
    let list_str = encode_uuid(list_id);
    let owned = conn
      .query_row(
        "SELECT 1 FROM contact_lists WHERE id = ?1 AND user_id = ?2",
        rusqlite::params![list_str, owner],
        |_| Ok(()),
      )
      .optional()?
      .is_some();
    if !owned {
      return Err(Error::ListNotFound(list_id));
    }

    conn.execute(
      "INSERT INTO contact_list_memberships (id, contact_id, list_id, position, added_at)
       VALUES (?1, ?2, ?3, 0, ?4)",
      rusqlite::params![encode_uuid(Uuid::new_v4()), contact_id, list_str, added_at],
    )?;
  }
  Ok(())
}

/// Insert the membership batch in its own transaction.
fn attach_lists(
  conn: &mut rusqlite::Connection,
  owner: &str,
  contact_id: &str,
  list_ids: &[Uuid],
  added_at: &str,
) -> Result<()> {
  let tx = conn.transaction()?;
  insert_memberships(&tx, owner, contact_id, list_ids, added_at)?;
  tx.commit()?;
  Ok(())
}

/// Distinct `(contact_id, list_id)` pairs for `contact_ids`.
fn load_memberships(
  conn: &rusqlite::Connection,
  contact_ids: &[String],
) -> rusqlite::Result<Vec<(String, String)>> {
  if contact_ids.is_empty() {
    return Ok(Vec::new());
  }
  let built = memberships_query(contact_ids);
  let mut stmt = conn.prepare(&built.sql)?;
  stmt
    .query_map(rusqlite::params_from_iter(built.params.iter()), |row| {
      Ok((row.get(0)?, row.get(1)?))
    })?
    .collect()
}

/// Map raw rows to view models, merging in their list ids.
fn assemble_contacts(
  raws: Vec<RawContact>,
  pairs: Vec<(String, String)>,
) -> Result<Vec<Contact>> {
  let mut by_contact: HashMap<String, Vec<Uuid>> = HashMap::new();
  for (contact_id, list_id) in pairs {
    by_contact
      .entry(contact_id)
      .or_default()
      .push(decode_uuid(&list_id)?);
  }

  raws
    .into_iter()
    .map(|raw| -> Result<Contact> {
      let list_ids = by_contact.remove(&raw.id).unwrap_or_default();
      Ok(Contact::from_record(raw.into_record()?, list_ids))
    })
    .collect()
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  // ── Lists ─────────────────────────────────────────────────────────────────

  async fn list_lists(&self, owner: UserId) -> Result<Vec<ContactList>> {
    self.query_lists(Some(owner)).await
  }

  async fn list_all_lists(&self) -> Result<Vec<ContactList>> {
    self.query_lists(None).await
  }

  async fn create_list(&self, owner: UserId, draft: ListDraft) -> Result<ContactList> {
    let now = Utc::now();
    let record = ListRecord {
      id:          Uuid::new_v4(),
      user_id:     owner,
      name:        draft.name,
      description: draft.description,
      color:       draft.color.to_string(),
      icon:        Some(draft.icon),
      is_favorite: false,
      position:    0,
      tags:        Some(draft.tags),
      created_at:  now,
      updated_at:  now,
    };

    let id_str    = encode_uuid(record.id);
    let owner_str = encode_user(owner);
    let name      = record.name.clone();
    let desc      = record.description.clone();
    let color     = record.color.clone();
    let icon      = record.icon.clone();
    let tags_str  = encode_tags(record.tags.as_deref().unwrap_or_default())?;
    let at_str    = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact_lists (
             id, user_id, name, description, color, icon,
             is_favorite, position, tags, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0, ?7, ?8, ?8)",
          rusqlite::params![id_str, owner_str, name, desc, color, icon, tags_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(list_id = %record.id, %owner, "list created");
    Ok(ContactList::from_record(record, 0))
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn search_contacts(
    &self,
    owner: UserId,
    query: &ContactQuery,
  ) -> Result<Vec<Contact>> {
    tracing::debug!(
      %owner,
      text = query.needle().is_some(),
      list_id = ?query.list_id,
      page = query.page(),
      page_size = query.page_size(),
      "searching contacts"
    );
    let built = contacts_query(owner, query);

    let (raws, pairs) = self
      .conn
      .call(move |conn| {
        let raws = {
          let mut stmt = conn.prepare(&built.sql)?;
          stmt
            .query_map(
              rusqlite::params_from_iter(built.params.iter()),
              RawContact::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let ids: Vec<String> = raws.iter().map(|r| r.id.clone()).collect();
        let pairs = load_memberships(conn, &ids)?;
        Ok((raws, pairs))
      })
      .await?;

    assemble_contacts(raws, pairs)
  }

  async fn get_contact(&self, owner: UserId, id: Uuid) -> Result<Option<Contact>> {
    let id_str    = encode_uuid(id);
    let owner_str = encode_user(owner);

    let found = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!(
              "SELECT {CONTACT_COLUMNS} FROM contacts c
               WHERE c.id = ?1 AND c.user_id = ?2"
            ),
            rusqlite::params![id_str, owner_str],
            RawContact::from_row,
          )
          .optional()?;
        let pairs = match &raw {
          Some(r) => load_memberships(conn, std::slice::from_ref(&r.id))?,
          None => Vec::new(),
        };
        Ok(raw.map(|r| (r, pairs)))
      })
      .await?;

    match found {
      Some((raw, pairs)) => Ok(assemble_contacts(vec![raw], pairs)?.pop()),
      None => Ok(None),
    }
  }

  async fn create_contact(&self, owner: UserId, draft: ContactDraft) -> Result<Contact> {
    let now = Utc::now();
    let record = ContactRecord {
      id:                    Uuid::new_v4(),
      user_id:               owner,
      first_name:            draft.first_name,
      last_name:             draft.last_name,
      company:               draft.company,
      job_title:             draft.job_title,
      email:                 draft.email,
      phone:                 draft.phone,
      linkedin_url:          draft.linkedin,
      notes:                 draft.notes,
      tags:                  Some(draft.tags),
      relationship_strength: i64::from(draft.relationship_strength),
      created_at:            now,
      updated_at:            now,
    };
    let row       = ContactRow::encode(&record)?;
    let list_ids  = draft.list_ids.clone();
    let owner_str = encode_user(owner);

    match self.policy {
      MembershipPolicy::BestEffort => {
        let outcome = self
          .conn
          .call(move |conn| -> tokio_rusqlite::Result<Result<()>> {
            row.insert(conn)?;
            if list_ids.is_empty() {
              return Ok(Ok(()));
            }
            Ok(attach_lists(conn, &owner_str, &row.id, &list_ids, &row.created_at))
          })
          .await?;

        if let Err(e) = outcome {
          tracing::warn!(
            contact_id = %record.id,
            lists = draft.list_ids.len(),
            error = %e,
            "contact created but attaching it to lists failed"
          );
        }
      }
      MembershipPolicy::Atomic => {
        self
          .conn
          .call(move |conn| -> tokio_rusqlite::Result<Result<()>> {
            let tx = conn.transaction()?;
            row.insert(&tx)?;
            if let Err(e) =
              insert_memberships(&tx, &owner_str, &row.id, &list_ids, &row.created_at)
            {
              // Dropping `tx` rolls the contact back too.
              return Ok(Err(e));
            }
            tx.commit()?;
            Ok(Ok(()))
          })
          .await??;
      }
    }

    tracing::debug!(contact_id = %record.id, %owner, "contact created");
    Ok(Contact::from_record(record, draft.list_ids))
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  async fn add_to_list(&self, owner: UserId, list_id: Uuid, contact_id: Uuid) -> Result<bool> {
    let owner_str   = encode_user(owner);
    let list_str    = encode_uuid(list_id);
    let contact_str = encode_uuid(contact_id);
    let added_at    = encode_dt(Utc::now());

    let added = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let owns = |sql: &str, id: &str| {
          tx.query_row(sql, rusqlite::params![id, owner_str], |_| Ok(()))
            .optional()
            .map(|r| r.is_some())
        };
        if !owns("SELECT 1 FROM contacts WHERE id = ?1 AND user_id = ?2", &contact_str)?
          || !owns("SELECT 1 FROM contact_lists WHERE id = ?1 AND user_id = ?2", &list_str)?
        {
          return Ok(false);
        }

        let already = tx
          .query_row(
            "SELECT 1 FROM contact_list_memberships
             WHERE list_id = ?1 AND contact_id = ?2 LIMIT 1",
            rusqlite::params![list_str, contact_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !already {
          tx.execute(
            "INSERT INTO contact_list_memberships (id, contact_id, list_id, position, added_at)
             SELECT ?1, ?2, ?3, COALESCE(MAX(position), -1) + 1, ?4
             FROM contact_list_memberships WHERE list_id = ?3",
            rusqlite::params![encode_uuid(Uuid::new_v4()), contact_str, list_str, added_at],
          )?;
        }
        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(added)
  }

  async fn remove_from_list(
    &self,
    owner: UserId,
    list_id: Uuid,
    contact_id: Uuid,
  ) -> Result<bool> {
    let owner_str   = encode_user(owner);
    let list_str    = encode_uuid(list_id);
    let contact_str = encode_uuid(contact_id);

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM contact_list_memberships
           WHERE list_id = ?1 AND contact_id = ?2
             AND list_id IN (SELECT id FROM contact_lists WHERE user_id = ?3)",
          rusqlite::params![list_str, contact_str, owner_str],
        )?;
        Ok(n)
      })
      .await?;

    Ok(removed > 0)
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn dashboard_stats(&self, owner: UserId) -> Result<DashboardStats> {
    let owner_str  = encode_user(owner);
    let cutoff_str = encode_dt(Utc::now() - Duration::days(RECENT_WINDOW_DAYS));

    let record: Option<StatsRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT
               (SELECT COUNT(*) FROM contact_lists WHERE user_id = ?1),
               (SELECT COUNT(*) FROM contacts      WHERE user_id = ?1),
               (SELECT COUNT(*) FROM contact_lists WHERE user_id = ?1 AND is_favorite = 1),
               (SELECT COUNT(*) FROM contacts      WHERE user_id = ?1 AND created_at >= ?2)",
            rusqlite::params![owner_str, cutoff_str],
            |row| {
              Ok(StatsRecord {
                total_lists:    row.get(0)?,
                total_contacts: row.get(1)?,
                favorite_lists: row.get(2)?,
                recently_added: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(record.unwrap_or_default().into())
  }
}
