//! Chat proxy endpoints: `GET /chat?prompt=` and `POST /chat {prompt}`.

use super::failure;
use crate::{app::AppState, chat::ChatMessage, error::Error};
use axum::{
  extract::{rejection::JsonRejection, Query, State},
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ChatParams {
  pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
  pub status: &'static str,
  pub message: ChatMessage,
}

pub async fn chat_query(
  State(state): State<AppState>,
  Query(params): Query<ChatParams>,
) -> Response {
  reply(&state, params).await
}

pub async fn chat_body(
  State(state): State<AppState>,
  payload: Result<Json<ChatParams>, JsonRejection>,
) -> Response {
  let params = payload.map(|Json(p)| p).unwrap_or_default();
  reply(&state, params).await
}

async fn reply(state: &AppState, params: ChatParams) -> Response {
  let prompt = params.prompt.as_deref().map(str::trim).unwrap_or_default();
  if prompt.is_empty() {
    return failure(state, "chat", Error::validation("prompt wajib diisi"));
  }
  match state.chat.generate_reply(prompt).await {
    Ok(content) => Json(ChatReply {
      status: "success",
      message: ChatMessage::assistant(content),
    })
    .into_response(),
    Err(e) => failure(state, "chat", e),
  }
}
