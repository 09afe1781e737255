//! JSON HTTP API for confman.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ConferenceStore`](confman_core::store::ConferenceStore). Every route
//! requires HTTP Basic credentials; see [`auth`].

pub mod auth;
pub mod error;
pub mod extract;
pub mod reviews;
pub mod submissions;

pub use error::ApiError;
pub use extract::ApiJson;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router,
  routing::{get, post},
};
use confman_core::store::ConferenceStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and `CONFMAN_*`
  /// environment variables, in increasing priority.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000_i64)?
      .set_default("store_path", "confman.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CONFMAN"))
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ConferenceStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ConferenceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/submissions",                   post(submissions::create::<S>))
    .route("/submissions/accepted",          get(submissions::accepted::<S>))
    .route("/submissions/{id}/status",       get(submissions::status::<S>))
    .route("/submissions/{id}/decision",     post(submissions::decide::<S>))
    .route("/submissions/{id}/camera-ready", post(submissions::camera_ready::<S>))
    .route("/submissions/{id}/reviews",      get(reviews::list::<S>).post(reviews::create::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
