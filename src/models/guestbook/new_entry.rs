//! Validated input for a new guestbook entry.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Request body for `POST /guestbook`. Both fields are optional here so a
/// missing field reports the same validation error as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct NewEntryRequest {
  pub name: Option<String>,
  pub message: Option<String>,
}

/// Trimmed, non-empty name and message. Stores only accept this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
  name: String,
  message: String,
}

impl NewEntry {
  pub fn new(name: &str, message: &str) -> Result<Self> {
    let name = name.trim();
    let message = message.trim();
    if name.is_empty() || message.is_empty() {
      return Err(Error::missing_fields());
    }
    Ok(Self {
      name: name.to_string(),
      message: message.to_string(),
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn into_parts(self) -> (String, String) {
    (self.name, self.message)
  }
}
