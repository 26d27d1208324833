//! Profile passthrough.

use super::failure;
use crate::{app::AppState, models::response::envelope::Success};
use axum::{
  extract::State,
  response::{IntoResponse, Response},
  Json,
};

pub async fn get_profile(State(state): State<AppState>) -> Response {
  match state.profile.get_profile().await {
    Ok(profile) => Json(Success::new(profile)).into_response(),
    Err(e) => failure(&state, "get_profile", e),
  }
}
