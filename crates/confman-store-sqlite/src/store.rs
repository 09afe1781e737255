//! [`SqliteStore`]: the SQLite implementation of [`ConferenceStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use confman_core::{
  model::{NewReview, NewSubmission, NewUser, Review, Submission, SubmissionStatus, User},
  store::ConferenceStore,
};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use crate::{
  Result,
  encode::{
    REVIEW_COLUMNS, RawReview, RawSubmission, RawUser, SUBMISSION_COLUMNS, USER_COLUMNS,
    encode_dt, encode_role, encode_status,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A confman store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// are funnelled through one connection thread, and every mutation runs in
/// an `IMMEDIATE` transaction, so concurrent writers are serialised.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Read one submission inside an open connection or transaction.
fn select_submission(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawSubmission>> {
  conn
    .query_row(
      &format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = ?1"),
      rusqlite::params![id],
      RawSubmission::from_row,
    )
    .optional()
}

// ─── ConferenceStore impl ────────────────────────────────────────────────────

impl ConferenceStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let email    = input.email.clone();
    let role_str = encode_role(input.role);
    let hash     = input.password_hash.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (email, role, password_hash) VALUES (?1, ?2, ?3)",
          rusqlite::params![email, role_str, hash],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(User {
      id,
      email:         input.email,
      role:          input.role,
      password_hash: input.password_hash,
    })
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
              rusqlite::params![id],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
              rusqlite::params![email],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  async fn add_submission(&self, input: NewSubmission) -> Result<Submission> {
    let title      = input.title.clone();
    let author_id  = input.author_id;
    let status     = SubmissionStatus::Submitted;
    let status_str = encode_status(status);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO submissions (title, author_id, status) VALUES (?1, ?2, ?3)",
          rusqlite::params![title, author_id, status_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Submission {
      id,
      title: input.title,
      author_id,
      status,
      decision_date: None,
    })
  }

  async fn get_submission(&self, id: i64) -> Result<Option<Submission>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_submission(conn, id)?))
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }

  async fn list_submissions(
    &self,
    status: Option<SubmissionStatus>,
  ) -> Result<Vec<Submission>> {
    let status_str = status.map(encode_status);

    let raws: Vec<RawSubmission> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBMISSION_COLUMNS} FROM submissions
           WHERE ?1 IS NULL OR status = ?1
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status_str], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }

  async fn record_decision(
    &self,
    id:         i64,
    status:     SubmissionStatus,
    decided_at: DateTime<Utc>,
  ) -> Result<Option<Submission>> {
    let status_str = encode_status(status);
    let at_str     = encode_dt(decided_at);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
          "UPDATE submissions SET status = ?2, decision_date = ?3 WHERE id = ?1",
          rusqlite::params![id, status_str, at_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = select_submission(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }

  async fn transition_status(
    &self,
    id:   i64,
    from: SubmissionStatus,
    to:   SubmissionStatus,
  ) -> Result<Option<Submission>> {
    let from_str = encode_status(from);
    let to_str   = encode_status(to);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
          "UPDATE submissions SET status = ?3 WHERE id = ?1 AND status = ?2",
          rusqlite::params![id, from_str, to_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = select_submission(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  async fn record_review(&self, input: NewReview) -> Result<Option<Review>> {
    let created_at     = Utc::now();
    let at_str         = encode_dt(created_at);
    let comment        = input.comment.clone();
    let submitted      = encode_status(SubmissionStatus::Submitted);
    let under_review   = encode_status(SubmissionStatus::UnderReview);
    let submission_id  = input.submission_id;
    let reviewer_id    = input.reviewer_id;
    let score          = input.score;

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if select_submission(&tx, submission_id)?.is_none() {
          return Ok(None);
        }
        tx.execute(
          "INSERT INTO reviews (submission_id, reviewer_id, score, comment, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![submission_id, reviewer_id, score, comment, at_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
          "UPDATE submissions SET status = ?3 WHERE id = ?1 AND status = ?2",
          rusqlite::params![submission_id, submitted, under_review],
        )?;
        tx.commit()?;
        Ok(Some(id))
      })
      .await?;

    Ok(id.map(|id| Review {
      id,
      submission_id,
      reviewer_id,
      score,
      comment: input.comment,
      created_at,
    }))
  }

  async fn list_reviews(&self, submission_id: i64) -> Result<Vec<Review>> {
    let raws: Vec<RawReview> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {REVIEW_COLUMNS} FROM reviews WHERE submission_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![submission_id], RawReview::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReview::into_review).collect()
  }
}
