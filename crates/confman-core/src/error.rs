//! Error types for `confman-core`.

use thiserror::Error;

use crate::model::SubmissionStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("permission denied: {0}")]
  PermissionDenied(String),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("cannot move a submission from {from} to {to}")]
  InvalidTransition {
    from: SubmissionStatus,
    to:   SubmissionStatus,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error from a [`ConferenceStore`](crate::store::ConferenceStore).
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  pub(crate) fn submission_not_found(id: i64) -> Self {
    Self::NotFound(format!("submission {id} not found"))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
