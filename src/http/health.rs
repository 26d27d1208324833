use crate::{app::AppState, models::response::envelope::Success};
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub async fn health(State(state): State<AppState>) -> Json<Success<Value>> {
  Json(Success::new(json!({ "store": state.store.backend() })))
}
