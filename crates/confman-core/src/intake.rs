//! Intake operations that populate the store: accounts, papers, reviews and
//! camera-ready uploads.

use tracing::info;

use crate::{
  Error, Result,
  caller::{Caller, require_role},
  model::{
    NewReview, NewSubmission, NewUser, Review, Role, Submission, SubmissionStatus, User,
  },
  store::ConferenceStore,
};

/// Valid review scores, inclusive.
pub const SCORE_RANGE: std::ops::RangeInclusive<i64> = 1..=10;

/// Canonical form of an account email: trimmed and ASCII-lowercased. Used
/// both when registering and when resolving login credentials.
pub fn normalize_email(email: &str) -> String { email.trim().to_ascii_lowercase() }

/// Create an account. Emails are unique up to [`normalize_email`];
/// `password_hash` must already be an argon2 PHC string.
pub async fn register_user<S: ConferenceStore>(store: &S, input: NewUser) -> Result<User> {
  let email = normalize_email(&input.email);
  if email.is_empty() || !email.contains('@') {
    return Err(Error::InvalidArgument(format!("invalid email address: {email:?}")));
  }

  if store
    .get_user_by_email(&email)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::InvalidArgument(format!("{email} is already registered")));
  }

  let user = store
    .add_user(NewUser { email, ..input })
    .await
    .map_err(Error::store)?;

  info!(user_id = user.id, role = %user.role, "user registered");
  Ok(user)
}

/// Submit a new paper authored by `caller`. It starts out `Submitted`.
pub async fn submit_paper<S: ConferenceStore>(
  store: &S,
  title: &str,
  caller: &impl Caller,
) -> Result<Submission> {
  let title = title.trim();
  if title.is_empty() {
    return Err(Error::InvalidArgument("title must not be empty".into()));
  }

  let submission = store
    .add_submission(NewSubmission { title: title.to_owned(), author_id: Some(caller.user_id()) })
    .await
    .map_err(Error::store)?;

  info!(submission_id = submission.id, author_id = caller.user_id(), "paper submitted");
  Ok(submission)
}

/// Record a reviewer's score and comment.
///
/// The first review of a `Submitted` paper moves it to `UnderReview`; the
/// insert and the status change share one store transaction.
pub async fn submit_review<S: ConferenceStore>(
  store: &S,
  submission_id: i64,
  score: i64,
  comment: &str,
  caller: &impl Caller,
) -> Result<Review> {
  require_role(caller, &[Role::Reviewer, Role::Chair], "review submissions")?;

  if !SCORE_RANGE.contains(&score) {
    return Err(Error::InvalidArgument(format!(
      "score {score} is outside {}..={}",
      SCORE_RANGE.start(),
      SCORE_RANGE.end()
    )));
  }

  let review = store
    .record_review(NewReview {
      submission_id,
      reviewer_id: caller.user_id(),
      score,
      comment: comment.to_owned(),
    })
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  info!(submission_id, reviewer_id = caller.user_id(), score, "review recorded");
  Ok(review)
}

/// Mark an accepted paper as camera-ready. Only its author or a chair may do
/// this, and only from `Accept`.
pub async fn submit_camera_ready<S: ConferenceStore>(
  store: &S,
  submission_id: i64,
  caller: &impl Caller,
) -> Result<Submission> {
  let submission = store
    .get_submission(submission_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  let is_author = submission.author_id == Some(caller.user_id());
  if !is_author && caller.role() != Role::Chair {
    return Err(Error::PermissionDenied(
      "only the author or a chair may submit the camera-ready version".into(),
    ));
  }

  let to = SubmissionStatus::CameraReady;
  if !submission.status.can_transition_to(to) {
    return Err(Error::InvalidTransition { from: submission.status, to });
  }

  match store
    .transition_status(submission_id, SubmissionStatus::Accept, to)
    .await
    .map_err(Error::store)?
  {
    Some(updated) => {
      info!(submission_id, "camera-ready version submitted");
      Ok(updated)
    }
    // A chair changed the decision between our read and the write.
    None => {
      let current = store
        .get_submission(submission_id)
        .await
        .map_err(Error::store)?
        .ok_or_else(|| Error::submission_not_found(submission_id))?;
      Err(Error::InvalidTransition { from: current.status, to })
    }
  }
}
