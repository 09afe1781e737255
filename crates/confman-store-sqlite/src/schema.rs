//! SQL schema for the confman SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    role          TEXT NOT NULL DEFAULT 'author'
                  CHECK (role IN ('author', 'reviewer', 'chair')),
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS submissions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT NOT NULL,
    author_id     INTEGER REFERENCES users(id),
    status        TEXT NOT NULL DEFAULT 'Submit'
                  CHECK (status IN ('Submit', 'under_review', 'accept', 'reject',
                                    'camera_ready_submit')),
    decision_date TEXT,             -- RFC 3339 UTC; NULL until decided
    CHECK ((decision_date IS NOT NULL)
           = (status IN ('accept', 'reject', 'camera_ready_submit')))
);

CREATE TABLE IF NOT EXISTS reviews (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    submission_id INTEGER NOT NULL REFERENCES submissions(id),
    reviewer_id   INTEGER NOT NULL REFERENCES users(id),
    score         INTEGER NOT NULL,
    comment       TEXT NOT NULL DEFAULT '',
    created_at    TEXT NOT NULL     -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS submissions_status_idx ON submissions(status);
CREATE INDEX IF NOT EXISTS reviews_submission_idx ON reviews(submission_id);

PRAGMA user_version = 1;
";
