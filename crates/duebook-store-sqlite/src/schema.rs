//! SQL schema for the Duebook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS` / `OR IGNORE`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA synchronous = FULL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS subjects (
    name  TEXT PRIMARY KEY,
    color TEXT NOT NULL              -- canonical '#RRGGBB'
);

CREATE TABLE IF NOT EXISTS assignments (
    id         INTEGER PRIMARY KEY,  -- allocated from counters, never reused
    title      TEXT NOT NULL,
    subject    TEXT NOT NULL REFERENCES subjects(name),
    due_date   TEXT NOT NULL,        -- 'YYYY-MM-DD'
    memo       TEXT NOT NULL DEFAULT '',
    images     TEXT NOT NULL DEFAULT '[]',  -- JSON array of asset references
    created_at TEXT NOT NULL         -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS counters (
    name  TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);

-- Seed the id counter from existing rows the first time only.
INSERT OR IGNORE INTO counters (name, value)
    SELECT 'next_assignment_id', COALESCE(MAX(id), 0) + 1 FROM assignments;

CREATE INDEX IF NOT EXISTS assignments_subject_idx ON assignments(subject);

PRAGMA user_version = 1;
";

/// Key of the assignment id row in `counters`.
pub const NEXT_ASSIGNMENT_ID: &str = "next_assignment_id";
