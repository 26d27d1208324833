//! Guestbook JSON API.

use super::failure;
use crate::{
  app::AppState,
  error::Error,
  models::{guestbook::new_entry::NewEntryRequest, response::envelope::Success},
};
use axum::{
  extract::{rejection::JsonRejection, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{debug, info};

pub async fn list_entries(State(state): State<AppState>) -> Response {
  match state.store.list().await {
    Ok(entries) => Json(Success::new(entries)).into_response(),
    Err(e) => failure(&state, "list_entries", e),
  }
}

/// A body that is not a JSON object with string fields is reported the
/// same way as missing fields.
pub async fn create_entry(
  State(state): State<AppState>,
  payload: Result<Json<NewEntryRequest>, JsonRejection>,
) -> Response {
  let req = match payload {
    Ok(Json(req)) => req,
    Err(rejection) => {
      debug!("create_entry body rejected: {rejection}");
      return failure(&state, "create_entry", Error::missing_fields());
    }
  };
  let name = req.name.as_deref().unwrap_or_default();
  let message = req.message.as_deref().unwrap_or_default();
  match state.store.append(name, message).await {
    Ok(entry) => {
      info!(id = entry.id, backend = state.store.backend(), "guestbook entry created");
      (StatusCode::CREATED, Json(Success::new(entry))).into_response()
    }
    Err(e) => failure(&state, "create_entry", e),
  }
}
