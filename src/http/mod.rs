//! HTTP router and handlers.

use crate::{app::AppState, error::Error, models::response::envelope::Failure};
use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use std::path::Path;
use tower_http::{
  cors::CorsLayer,
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};
use tracing::{error, info, warn};

pub mod chat;
pub mod guestbook;
pub mod health;
pub mod profile;

/// Assemble the API router. Every route is reachable both at the root and
/// under `/api`. Unknown paths and methods answer with the JSON error
/// envelope; the static frontend may later take over unknown root paths,
/// but never `/api/*`.
pub fn build_router(state: AppState) -> Router {
  let api = Router::new()
    .route(
      "/guestbook",
      get(guestbook::list_entries)
        .post(guestbook::create_entry)
        .fallback(method_not_allowed),
    )
    .route(
      "/profile",
      get(profile::get_profile).fallback(method_not_allowed),
    )
    .route(
      "/chat",
      get(chat::chat_query)
        .post(chat::chat_body)
        .fallback(method_not_allowed),
    )
    .route("/health", get(health::health).fallback(method_not_allowed));

  Router::new()
    .merge(api.clone())
    .nest("/api", api.fallback(not_found))
    .fallback(not_found)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Serve the static frontend for any other path, falling back to
/// `index.html` so client-side routes resolve.
pub fn with_frontend(router: Router, public_dir: &Path) -> Router {
  if !public_dir.is_dir() {
    warn!(dir = %public_dir.display(), "public dir missing; static frontend disabled");
    return router;
  }
  info!(dir = %public_dir.display(), "serving static frontend");
  let index = ServeFile::new(public_dir.join("index.html"));
  router.fallback_service(ServeDir::new(public_dir).fallback(index))
}

async fn not_found(State(state): State<AppState>) -> Response {
  failure(&state, "route", Error::NotFound("endpoint".into()))
}

async fn method_not_allowed() -> Response {
  (
    StatusCode::METHOD_NOT_ALLOWED,
    Json(Failure::new("method tidak diizinkan")),
  )
    .into_response()
}

/// Log `err` and render it as `{status: "error", message}`.
///
/// Storage and upstream detail stays in the log unless the deployment opts
/// into exposing it.
pub(crate) fn failure(state: &AppState, context: &str, err: Error) -> Response {
  let status = match &err {
    Error::Validation(_) => StatusCode::BAD_REQUEST,
    Error::NotFound(_) => StatusCode::NOT_FOUND,
    Error::Upstream(_) => StatusCode::BAD_GATEWAY,
    Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    Error::Storage(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
  };
  if status.is_server_error() {
    error!("{context} error: {err}");
  } else {
    info!("{context} rejected: {err}");
  }
  let message = match err {
    Error::Validation(m) | Error::Unavailable(m) => m,
    Error::NotFound(what) => format!("{what} tidak ditemukan"),
    Error::Storage(m) | Error::Config(m) if state.expose_errors => m,
    Error::Upstream(m) if state.expose_errors => m,
    Error::Storage(_) | Error::Config(_) => "gagal mengakses penyimpanan".to_string(),
    Error::Upstream(_) => "layanan chat sedang bermasalah".to_string(),
  };
  (status, Json(Failure::new(message))).into_response()
}
