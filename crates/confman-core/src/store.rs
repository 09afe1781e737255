//! The `ConferenceStore` trait.
//!
//! Implemented by storage backends (e.g. `confman-store-sqlite`). The engine
//! and the HTTP layer depend on this abstraction, never on a concrete
//! backend; a store handle is passed explicitly into every operation.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::model::{
  NewReview, NewSubmission, NewUser, Review, Submission, SubmissionStatus, User,
};

/// Abstraction over a confman store backend.
///
/// Every mutating method is a single atomic unit: either all of its writes
/// land or none do.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ConferenceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look a user up by email (exact match).
  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Submissions ───────────────────────────────────────────────────────

  /// Persist a new submission in [`SubmissionStatus::Submitted`].
  fn add_submission(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  fn get_submission(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// List submissions ordered by id, optionally restricted to one status.
  fn list_submissions(
    &self,
    status: Option<SubmissionStatus>,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;

  /// Overwrite `status` and `decision_date` and return the updated record.
  /// Returns `None` if no submission has this id.
  fn record_decision(
    &self,
    id: i64,
    status: SubmissionStatus,
    decided_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// Move a submission from `from` to `to` only if it is currently in
  /// `from` (compare-and-set). Returns `None` if the id is unknown or the
  /// current status differs. `decision_date` is left as is.
  fn transition_status(
    &self,
    id: i64,
    from: SubmissionStatus,
    to: SubmissionStatus,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  // ── Reviews ───────────────────────────────────────────────────────────

  /// Insert a review and, in the same transaction, move its submission from
  /// `Submitted` to `UnderReview`. Submissions in any other status keep it.
  /// `created_at` is set by the store. Returns `None` if the submission does
  /// not exist.
  fn record_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Option<Review>, Self::Error>> + Send + '_;

  /// All reviews of a submission ordered by id; empty if there are none.
  fn list_reviews(
    &self,
    submission_id: i64,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + '_;
}
