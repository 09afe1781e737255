//! Request-body extraction that reports failures as [`ApiError`].

use axum::extract::FromRequest;

use crate::error::ApiError;

/// [`axum::Json`] whose rejection is an [`ApiError::BadRequest`], so a body
/// with the wrong shape gets a JSON `{"error": ...}` response like every
/// other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
