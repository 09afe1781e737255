//! Handlers for `/submissions/{id}/reviews`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/submissions/{id}/reviews` | Empty list if none; 404 if the submission is unknown |
//! | `POST` | `/submissions/{id}/reviews` | Reviewer or chair; body: `{"score":7,"comment":"..."}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confman_core::{intake, model::Review, query, store::ConferenceStore};
use serde::Deserialize;

use crate::{AppState, auth::CurrentUser, error::ApiError, extract::ApiJson};

/// `GET /submissions/{id}/reviews`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Review>>, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(query::list_reviews(state.store.as_ref(), id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub score:   i64,
  #[serde(default)]
  pub comment: String,
}

/// `POST /submissions/{id}/reviews`: returns 201 + the stored review.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<i64>,
  ApiJson(body): ApiJson<ReviewBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let review =
    intake::submit_review(state.store.as_ref(), id, body.score, &body.comment, &user).await?;
  Ok((StatusCode::CREATED, Json(review)))
}
