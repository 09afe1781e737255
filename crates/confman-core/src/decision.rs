//! The decision engine: chair-only accept/reject transitions.
//!
//! A decision overwrites `status` and `decision_date` in one store
//! transaction. Decisions are not idempotent; repeating one re-stamps the
//! date. Once the role and existence checks pass the transition is
//! unconditional, whatever status the submission was in.

use chrono::Utc;
use tracing::info;

use crate::{
  Error, Result,
  caller::{Caller, require_chair},
  model::{Decision, Submission},
  store::ConferenceStore,
};

/// The action named in permission errors for decisions.
pub const ACTION: &str = "make decisions";

/// Decide on a submission from a raw decision string.
///
/// Checks run in order: the caller must be a chair, the submission must
/// exist, and `decision` must be `accept` or `reject` (any case). Nothing is
/// written unless all three pass.
pub async fn make_decision<S>(
  store: &S,
  submission_id: i64,
  decision: &str,
  caller: &impl Caller,
) -> Result<Submission>
where
  S: ConferenceStore,
{
  require_chair(caller, ACTION)?;

  store
    .get_submission(submission_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  let decision: Decision = decision.parse()?;
  decide(store, submission_id, decision, caller).await
}

/// Decide on a submission with an already-parsed [`Decision`].
///
/// Fails with [`Error::NotFound`] if no submission has this id at write time.
pub async fn decide<S>(
  store: &S,
  submission_id: i64,
  decision: Decision,
  caller: &impl Caller,
) -> Result<Submission>
where
  S: ConferenceStore,
{
  require_chair(caller, ACTION)?;

  let submission = store
    .record_decision(submission_id, decision.into(), Utc::now())
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  info!(
    submission_id,
    chair_id = caller.user_id(),
    status = %submission.status,
    "decision recorded"
  );
  Ok(submission)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    memory::{MemoryStore, user},
    model::{Role, SubmissionStatus},
  };

  #[tokio::test]
  async fn chair_accepts_submitted_paper() {
    let (store, ids) = MemoryStore::with_submissions(&["Paper"]);
    let before = Utc::now();

    let updated = make_decision(&store, ids[0], "accept", &user(1, Role::Chair))
      .await
      .unwrap();

    assert_eq!(updated.status, SubmissionStatus::Accept);
    let decided_at = updated.decision_date.expect("decision date set");
    assert!(decided_at >= before);
    assert_eq!(store.submission(ids[0]), updated);
  }

  #[tokio::test]
  async fn decision_value_is_case_insensitive() {
    let (store, ids) = MemoryStore::with_submissions(&["A", "B"]);
    let chair = user(1, Role::Chair);

    let upper = make_decision(&store, ids[0], "ACCEPT", &chair).await.unwrap();
    let lower = make_decision(&store, ids[1], "accept", &chair).await.unwrap();
    assert_eq!(upper.status, lower.status);

    let reject = make_decision(&store, ids[0], "ReJeCt", &chair).await.unwrap();
    assert_eq!(reject.status, SubmissionStatus::Reject);
  }

  #[tokio::test]
  async fn invalid_decision_leaves_submission_untouched() {
    let (store, ids) = MemoryStore::with_submissions(&["Paper"]);
    let before = store.submission(ids[0]);

    let err = make_decision(&store, ids[0], "maybe", &user(1, Role::Chair))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(store.submission(ids[0]), before);
    assert_eq!(store.writes(), 0);
  }

  #[tokio::test]
  async fn non_chairs_are_denied() {
    let (store, ids) = MemoryStore::with_submissions(&["Paper"]);
    let before = store.submission(ids[0]);

    for role in [Role::Author, Role::Reviewer] {
      let err = make_decision(&store, ids[0], "accept", &user(7, role))
        .await
        .unwrap_err();
      assert!(matches!(err, Error::PermissionDenied(_)), "{role}");
    }

    assert_eq!(store.submission(ids[0]), before);
    assert_eq!(store.writes(), 0);
  }

  #[tokio::test]
  async fn role_is_checked_before_existence() {
    let store = MemoryStore::default();
    let err = make_decision(&store, 999_999, "accept", &user(7, Role::Author))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied(_)));
  }

  #[tokio::test]
  async fn unknown_submission_is_not_found() {
    let store = MemoryStore::default();
    let err = make_decision(&store, 999_999, "accept", &user(1, Role::Chair))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = decide(&store, 999_999, Decision::Reject, &user(1, Role::Chair))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
  }

  #[tokio::test]
  async fn string_and_typed_decisions_agree() {
    let (store, ids) = MemoryStore::with_submissions(&["A", "B"]);
    let chair = user(1, Role::Chair);

    let parsed = make_decision(&store, ids[0], "Reject", &chair).await.unwrap();
    let typed = decide(&store, ids[1], Decision::Reject, &chair).await.unwrap();
    assert_eq!(parsed.status, typed.status);
    assert_eq!(store.writes(), 2);

    let err = decide(&store, ids[0], Decision::Accept, &user(2, Role::Reviewer))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied(_)));
    assert_eq!(store.submission(ids[0]).status, SubmissionStatus::Reject);
  }

  #[tokio::test]
  async fn repeated_decisions_write_each_time() {
    let (store, ids) = MemoryStore::with_submissions(&["Paper"]);
    let chair = user(1, Role::Chair);

    let first = decide(&store, ids[0], Decision::Accept, &chair).await.unwrap();
    let second = decide(&store, ids[0], Decision::Accept, &chair).await.unwrap();

    assert_eq!(store.writes(), 2);
    assert!(second.decision_date >= first.decision_date);
  }

  #[tokio::test]
  async fn chair_may_overturn_a_decision() {
    let (store, ids) = MemoryStore::with_submissions(&["Paper"]);
    let chair = user(1, Role::Chair);

    decide(&store, ids[0], Decision::Accept, &chair).await.unwrap();
    let overturned = decide(&store, ids[0], Decision::Reject, &chair).await.unwrap();

    assert_eq!(overturned.status, SubmissionStatus::Reject);
    assert!(overturned.decision_date.is_some());
  }
}
