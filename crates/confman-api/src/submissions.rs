//! Handlers for `/submissions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/submissions` | Body: `{"title":"..."}`; 201 + submission |
//! | `GET`  | `/submissions/accepted` | Chair only |
//! | `GET`  | `/submissions/{id}/status` | `{id, status}`; 404 if not found |
//! | `POST` | `/submissions/{id}/decision` | Chair only; body: [`DecisionBody`] |
//! | `POST` | `/submissions/{id}/camera-ready` | Author or chair; only from `accept` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use confman_core::{
  caller::require_chair,
  decision, intake,
  model::{StatusView, Submission, SubmissionStatus},
  query,
  store::ConferenceStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::CurrentUser, error::ApiError, extract::ApiJson};

// ─── Decision ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DecisionBody {
  /// Optional echo of the path id; must match it when present.
  pub submission_id: Option<i64>,
  /// `"accept"` or `"reject"`, any case.
  pub decision:      String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecisionResponse {
  pub submission_id: i64,
  pub new_status:    SubmissionStatus,
  pub message:       String,
}

/// `POST /submissions/{id}/decision`
///
/// The role check comes before the body is looked at, so a non-chair gets
/// 403 whatever they send.
pub async fn decide<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  body: Result<ApiJson<DecisionBody>, ApiError>,
) -> Result<Json<DecisionResponse>, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_chair(&user, decision::ACTION)?;
  let ApiJson(body) = body?;

  if let Some(body_id) = body.submission_id
    && body_id != id
  {
    return Err(ApiError::BadRequest(format!(
      "body submission_id {body_id} does not match path id {id}"
    )));
  }

  let updated = decision::make_decision(state.store.as_ref(), id, &body.decision, &user).await?;

  Ok(Json(DecisionResponse {
    submission_id: updated.id,
    new_status:    updated.status,
    message:       "Decision made successfully.".to_owned(),
  }))
}

// ─── Accepted list ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedSubmission {
  pub id:            i64,
  pub title:         String,
  pub status:        SubmissionStatus,
  pub decision_date: Option<DateTime<Utc>>,
}

impl From<Submission> for AcceptedSubmission {
  fn from(s: Submission) -> Self {
    Self {
      id:            s.id,
      title:         s.title,
      status:        s.status,
      decision_date: s.decision_date,
    }
  }
}

/// `GET /submissions/accepted`
pub async fn accepted<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<AcceptedSubmission>>, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let list = query::list_accepted(state.store.as_ref(), &user).await?;
  Ok(Json(list.into_iter().map(AcceptedSubmission::from).collect()))
}

// ─── Status ───────────────────────────────────────────────────────────────────

/// `GET /submissions/{id}/status`
pub async fn status<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<StatusView>, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(query::get_status(state.store.as_ref(), id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title: String,
}

/// `POST /submissions`, body: `{"title":"..."}`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let submission = intake::submit_paper(state.store.as_ref(), &body.title, &user).await?;
  Ok((StatusCode::CREATED, Json(submission)))
}

// ─── Camera-ready ─────────────────────────────────────────────────────────────

/// `POST /submissions/{id}/camera-ready`
pub async fn camera_ready<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Submission>, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(intake::submit_camera_ready(state.store.as_ref(), id, &user).await?))
}
