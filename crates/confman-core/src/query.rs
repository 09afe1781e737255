//! Read-only lookups: status by id, the accepted list, reviews of a paper.

use tracing::debug;

use crate::{
  Error, Result,
  caller::{Caller, require_chair},
  model::{Review, StatusView, Submission, SubmissionStatus},
  store::ConferenceStore,
};

/// `{id, status}` of a submission; [`Error::NotFound`] if it does not exist.
pub async fn get_status<S: ConferenceStore>(store: &S, submission_id: i64) -> Result<StatusView> {
  let submission = store
    .get_submission(submission_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  Ok(StatusView { id: submission.id, status: submission.status })
}

/// Every submission whose status is exactly `Accept`. Chair only.
///
/// Camera-ready papers were accepted too, but they are past this stage and
/// are not listed.
pub async fn list_accepted<S: ConferenceStore>(
  store: &S,
  caller: &impl Caller,
) -> Result<Vec<Submission>> {
  require_chair(caller, "list accepted submissions")?;

  let accepted = store
    .list_submissions(Some(SubmissionStatus::Accept))
    .await
    .map_err(Error::store)?;

  debug!(count = accepted.len(), "listed accepted submissions");
  Ok(accepted)
}

/// All reviews of a submission, oldest first.
///
/// An existing submission without reviews yields an empty list; an unknown
/// id is [`Error::NotFound`].
pub async fn list_reviews<S: ConferenceStore>(store: &S, submission_id: i64) -> Result<Vec<Review>> {
  store
    .get_submission(submission_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::submission_not_found(submission_id))?;

  store.list_reviews(submission_id).await.map_err(Error::store)
}
