//! Query Builder — turns a [`ContactQuery`] into parameterised SQL.
//!
//! Caller-supplied text never reaches the SQL string: every value is bound
//! as a numbered parameter, and LIKE wildcards in the search needle are
//! escaped so they match literally.

use nettrack_core::{UserId, store::ContactQuery};
use rusqlite::{functions::FunctionFlags, types::Value};

use crate::encode::{CONTACT_COLUMNS, encode_user, encode_uuid};

/// Columns the free-text filter is matched against.
const SEARCH_COLUMNS: [&str; 5] =
  ["c.first_name", "c.last_name", "c.company", "c.job_title", "c.email"];

/// Unicode lower-casing SQL function. SQLite's own `LIKE` and `lower()` only
/// fold ASCII.
pub const FOLD_FN: &str = "nt_fold";

/// Register [`FOLD_FN`] on `conn`. Must run on every connection that executes
/// [`contacts_query`] output.
pub fn register_fold(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FN,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

/// SQL text plus its positional parameters.
#[derive(Debug)]
pub struct BuiltQuery {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl BuiltQuery {
  fn new() -> Self { Self { sql: String::new(), params: Vec::new() } }

  /// Register `value` and return its placeholder (`?N`).
  fn bind(&mut self, value: Value) -> String {
    self.params.push(value);
    format!("?{}", self.params.len())
  }
}

/// Escape `\`, `%` and `_` for use with `LIKE ... ESCAPE '\'`.
pub fn escape_like(needle: &str) -> String {
  let mut out = String::with_capacity(needle.len());
  for ch in needle.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(ch);
  }
  out
}

/// Build the page-of-contacts query for `owner`.
///
/// Rows come back ordered by first name (binary collation), then creation
/// time and id so that pagination is stable.
pub fn contacts_query(owner: UserId, query: &ContactQuery) -> BuiltQuery {
  let mut q = BuiltQuery::new();
  let mut conds = Vec::new();

  let owner_p = q.bind(Value::Text(encode_user(owner)));
  conds.push(format!("c.user_id = {owner_p}"));

  if let Some(list_id) = query.list_id {
    let list_p = q.bind(Value::Text(encode_uuid(list_id)));
    conds.push(format!(
      "EXISTS (SELECT 1 FROM contact_list_memberships m \
               WHERE m.contact_id = c.id AND m.list_id = {list_p})"
    ));
  }

  if let Some(needle) = query.needle() {
    let folded = escape_like(&needle.to_lowercase());
    let pattern_p = q.bind(Value::Text(format!("%{folded}%")));
    let any = SEARCH_COLUMNS
      .iter()
      .map(|col| format!("{FOLD_FN}({col}) LIKE {pattern_p} ESCAPE '\\'"))
      .collect::<Vec<_>>()
      .join(" OR ");
    conds.push(format!("({any})"));
  }

  let limit_p = q.bind(Value::Integer(i64::from(query.page_size())));
  let offset_p =
    q.bind(Value::Integer(i64::try_from(query.offset()).unwrap_or(i64::MAX)));

  q.sql = format!(
    "SELECT {CONTACT_COLUMNS}
     FROM contacts c
     WHERE {}
     ORDER BY c.first_name, c.created_at, c.id
     LIMIT {limit_p} OFFSET {offset_p}",
    conds.join(" AND ")
  );
  q
}

/// Build the `(contact_id, list_id)` lookup for a set of contacts, one row
/// per distinct pair in order of first attachment.
pub fn memberships_query(contact_ids: &[String]) -> BuiltQuery {
  let mut q = BuiltQuery::new();
  let placeholders = contact_ids
    .iter()
    .map(|id| q.bind(Value::Text(id.clone())))
    .collect::<Vec<_>>()
    .join(", ");

  q.sql = format!(
    "SELECT contact_id, list_id, MIN(added_at) AS first_added
     FROM contact_list_memberships
     WHERE contact_id IN ({placeholders})
     GROUP BY contact_id, list_id
     ORDER BY first_added, list_id"
  );
  q
}
