//! Chat proxy to a hosted language model.
//!
//! The provider speaks the Ollama-style chat API: a `messages` array in,
//! a single `message` object out.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait ChatBackend: Send + Sync {
  async fn generate_reply(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String,
  pub content: String,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    Self {
      role: "user".into(),
      content: content.into(),
    }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self {
      role: "assistant".into(),
      content: content.into(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct HttpChatConfig {
  pub url: String,
  pub model: String,
  pub api_key: Option<String>,
  pub timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessage>,
  stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
  message: Option<ChatMessage>,
}

/// Forwards prompts to the configured provider.
#[derive(Debug, Clone)]
pub struct HttpChat {
  http: Client,
  config: HttpChatConfig,
}

impl HttpChat {
  pub fn new(config: HttpChatConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| Error::Upstream(format!("chat client: {e}")))?;
    Ok(Self { http, config })
  }
}

#[async_trait]
impl ChatBackend for HttpChat {
  async fn generate_reply(&self, prompt: &str) -> Result<String> {
    let body = ChatRequest {
      model: &self.config.model,
      messages: vec![ChatMessage::user(prompt)],
      stream: false,
    };
    let mut req = self.http.post(&self.config.url).json(&body);
    if let Some(key) = &self.config.api_key {
      req = req.bearer_auth(key);
    }
    let resp = req
      .send()
      .await
      .map_err(|e| Error::Upstream(format!("chat request failed: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
      let text = resp.text().await.unwrap_or_default();
      return Err(Error::Upstream(format!("chat provider returned {status}: {}", text.trim())));
    }
    let parsed: ChatResponse = resp
      .json()
      .await
      .map_err(|e| Error::Upstream(format!("chat response decode: {e}")))?;
    let reply = parsed
      .message
      .map(|m| m.content)
      .filter(|c| !c.trim().is_empty())
      .ok_or_else(|| Error::Upstream("chat provider sent an empty reply".into()))?;
    debug!(chars = reply.len(), "chat reply received");
    Ok(reply)
  }
}

/// Used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledChat;

#[async_trait]
impl ChatBackend for DisabledChat {
  async fn generate_reply(&self, _prompt: &str) -> Result<String> {
    Err(Error::Unavailable("chat belum dikonfigurasi".into()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn disabled_chat_is_unavailable() {
    let err = DisabledChat.generate_reply("hi").await.unwrap_err();
    assert!(matches!(err, Error::Unavailable(_)));
  }

  #[test]
  fn request_body_shape() {
    let body = ChatRequest {
      model: "llama3",
      messages: vec![ChatMessage::user("halo")],
      stream: false,
    };
    let v = serde_json::to_value(&body).unwrap();
    assert_eq!(v["model"], "llama3");
    assert_eq!(v["messages"][0]["role"], "user");
    assert_eq!(v["messages"][0]["content"], "halo");
    assert_eq!(v["stream"], false);
  }
}
