//! Static profile passthrough.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::{io::ErrorKind, path::PathBuf};

#[async_trait]
pub trait ProfileSource: Send + Sync {
  async fn get_profile(&self) -> Result<Value>;
}

/// Serves a JSON document from disk, re-read on every request so edits
/// show up without a restart.
#[derive(Debug, Clone)]
pub struct FileProfile {
  path: PathBuf,
}

impl FileProfile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

#[async_trait]
impl ProfileSource for FileProfile {
  async fn get_profile(&self) -> Result<Value> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(b) => b,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Err(Error::NotFound("profile".into()));
      }
      Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
  }
}

/// Fixed in-process profile.
#[derive(Debug, Clone)]
pub struct StaticProfile(pub Value);

#[async_trait]
impl ProfileSource for StaticProfile {
  async fn get_profile(&self) -> Result<Value> {
    Ok(self.0.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[tokio::test]
  async fn reads_json_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, r#"{"profile":{"name":"Ada"},"links":[],"skills":[]}"#).unwrap();
    let v = FileProfile::new(&path).get_profile().await.unwrap();
    assert_eq!(v["profile"]["name"], "Ada");
  }

  #[tokio::test]
  async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileProfile::new(dir.path().join("nope.json"))
      .get_profile()
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
  }

  #[tokio::test]
  async fn invalid_json_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, "nope").unwrap();
    let err = FileProfile::new(&path).get_profile().await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
  }

  #[tokio::test]
  async fn static_profile_echoes_value() {
    let p = StaticProfile(json!({"profile": {"role": "dev"}}));
    assert_eq!(p.get_profile().await.unwrap()["profile"]["role"], "dev");
  }
}
