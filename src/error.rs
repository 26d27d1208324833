//! Error type shared by stores, capabilities and the HTTP layer.

use thiserror::Error;

/// Message returned to clients when a guestbook entry is incomplete.
pub const MISSING_FIELDS: &str = "name dan message wajib diisi";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// Input the caller can correct.
  #[error("{0}")]
  Validation(String),

  /// Backing medium unreachable, unwritable or reporting a fault.
  #[error("storage error: {0}")]
  Storage(String),

  /// Reserved for lookups of a single resource.
  #[error("not found: {0}")]
  NotFound(String),

  /// The chat provider answered with a failure.
  #[error("upstream error: {0}")]
  Upstream(String),

  /// A capability is not configured in this deployment.
  #[error("unavailable: {0}")]
  Unavailable(String),

  /// Invalid startup configuration.
  #[error("config error: {0}")]
  Config(String),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn storage(message: impl Into<String>) -> Self {
    Self::Storage(message.into())
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }

  /// Missing or empty guestbook fields.
  pub fn missing_fields() -> Self {
    Self::Validation(MISSING_FIELDS.to_string())
  }
}

impl From<std::io::Error> for Error {
  fn from(err: std::io::Error) -> Self {
    Error::Storage(err.to_string())
  }
}

impl From<serde_json::Error> for Error {
  fn from(err: serde_json::Error) -> Self {
    Error::Storage(err.to_string())
  }
}

impl From<sqlx::Error> for Error {
  fn from(err: sqlx::Error) -> Self {
    Error::Storage(err.to_string())
  }
}
