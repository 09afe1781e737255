//! HTTP Basic-auth extractor resolving the calling [`User`].
//!
//! The username is the account email; the password is checked against the
//! argon2 PHC string stored with the user.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use confman_core::{intake::normalize_email, model::User, store::ConferenceStore};
use rand_core::OsRng;
use tracing::warn;

use crate::{AppState, error::ApiError};

/// The authenticated caller. Present in a handler means the credentials
/// were verified.
pub struct CurrentUser(pub User);

/// Split an `Authorization: Basic …` header into `(username, password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((username.to_owned(), password.to_owned()))
}

/// Produce the argon2 PHC string stored in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Check `password` against a stored PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), ApiError> {
  let parsed_hash = PasswordHash::new(password_hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)
}

/// Resolve and verify the caller from request headers.
pub async fn authenticate<S>(headers: &HeaderMap, store: &S) -> Result<User, ApiError>
where
  S: ConferenceStore,
{
  let (email, password) = basic_credentials(headers)?;
  let email = normalize_email(&email);

  let Some(user) = store
    .get_user_by_email(&email)
    .await
    .map_err(ApiError::store)?
  else {
    warn!(%email, "authentication failed: unknown user");
    return Err(ApiError::Unauthorized);
  };

  if let Err(e) = verify_password(&password, &user.password_hash) {
    warn!(%email, "authentication failed: bad password");
    return Err(e);
  }

  Ok(user)
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    authenticate(&parts.headers, state.store.as_ref())
      .await
      .map(CurrentUser)
  }
}
