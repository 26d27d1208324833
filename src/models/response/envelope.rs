//! `{status, data}` / `{status, message}` response bodies.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Success<T> {
  pub status: &'static str,
  pub data: T,
}

impl<T> Success<T> {
  pub fn new(data: T) -> Self {
    Self {
      status: "success",
      data,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Failure {
  pub status: &'static str,
  pub message: String,
}

impl Failure {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      status: "error",
      message: message.into(),
    }
  }
}
