//! SQL schema for the nettrack SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS contact_lists (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    color       TEXT NOT NULL DEFAULT 'blue',   -- palette token (legacy rows: hex)
    icon        TEXT,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    position    INTEGER NOT NULL DEFAULT 0,
    tags        TEXT DEFAULT '[]',              -- JSON array
    created_at  TEXT NOT NULL,                  -- RFC 3339 UTC, fixed width
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    id                    TEXT PRIMARY KEY,
    user_id               TEXT NOT NULL,
    first_name            TEXT NOT NULL,
    last_name             TEXT,
    company               TEXT,
    job_title             TEXT,
    email                 TEXT,
    phone                 TEXT,
    linkedin_url          TEXT,
    notes                 TEXT,
    tags                  TEXT DEFAULT '[]',
    relationship_strength INTEGER NOT NULL DEFAULT 1,
    created_at            TEXT NOT NULL,
    updated_at            TEXT NOT NULL
);

-- No UNIQUE (contact_id, list_id): the same pair may appear more than once.
CREATE TABLE IF NOT EXISTS contact_list_memberships (
    id         TEXT PRIMARY KEY,
    contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    list_id    TEXT NOT NULL REFERENCES contact_lists(id) ON DELETE CASCADE,
    position   INTEGER NOT NULL DEFAULT 0,
    added_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_user_name_idx   ON contacts(user_id, first_name);
CREATE INDEX IF NOT EXISTS contacts_created_idx     ON contacts(created_at);
CREATE INDEX IF NOT EXISTS lists_user_position_idx  ON contact_lists(user_id, position);
CREATE INDEX IF NOT EXISTS memberships_list_idx     ON contact_list_memberships(list_id);
CREATE INDEX IF NOT EXISTS memberships_contact_idx  ON contact_list_memberships(contact_id);

PRAGMA user_version = 1;
";
