//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Roles and statuses are stored
//! under their wire names (`"chair"`, `"under_review"`, ...).

use chrono::{DateTime, Utc};
use confman_core::model::{Review, Role, Submission, SubmissionStatus, User};

use crate::{Error, Result};

pub const USER_COLUMNS: &str = "id, email, role, password_hash";
pub const SUBMISSION_COLUMNS: &str = "id, title, author_id, status, decision_date";
pub const REVIEW_COLUMNS: &str =
  "id, submission_id, reviewer_id, score, comment, created_at";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str { r.as_str() }

pub fn decode_role(s: &str) -> Result<Role> {
  s.parse()
    .map_err(|_| Error::UnknownValue { column: "role", value: s.to_owned() })
}

// ─── SubmissionStatus ────────────────────────────────────────────────────────

pub fn encode_status(s: SubmissionStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<SubmissionStatus> {
  s.parse()
    .map_err(|_| Error::UnknownValue { column: "status", value: s.to_owned() })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:            i64,
  pub email:         String,
  pub role:          String,
  pub password_hash: String,
}

impl RawUser {
  /// Map a row selected with [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      email:         row.get(1)?,
      role:          row.get(2)?,
      password_hash: row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      email:         self.email,
      role:          decode_role(&self.role)?,
      password_hash: self.password_hash,
    })
  }
}

/// Raw values read directly from a `submissions` row.
pub struct RawSubmission {
  pub id:            i64,
  pub title:         String,
  pub author_id:     Option<i64>,
  pub status:        String,
  pub decision_date: Option<String>,
}

impl RawSubmission {
  /// Map a row selected with [`SUBMISSION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      title:         row.get(1)?,
      author_id:     row.get(2)?,
      status:        row.get(3)?,
      decision_date: row.get(4)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:            self.id,
      title:         self.title,
      author_id:     self.author_id,
      status:        decode_status(&self.status)?,
      decision_date: self.decision_date.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw values read directly from a `reviews` row.
pub struct RawReview {
  pub id:            i64,
  pub submission_id: i64,
  pub reviewer_id:   i64,
  pub score:         i64,
  pub comment:       String,
  pub created_at:    String,
}

impl RawReview {
  /// Map a row selected with [`REVIEW_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      submission_id: row.get(1)?,
      reviewer_id:   row.get(2)?,
      score:         row.get(3)?,
      comment:       row.get(4)?,
      created_at:    row.get(5)?,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      id:            self.id,
      submission_id: self.submission_id,
      reviewer_id:   self.reviewer_id,
      score:         self.score,
      comment:       self.comment,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
