//! In-memory guestbook. Lost on restart.

use super::{next_stamp, GuestbookStore};
use crate::{
  error::Result,
  models::guestbook::{entry::Entry, new_entry::NewEntry},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

/// Entries kept oldest-first in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RwLock<Vec<Entry>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl GuestbookStore for MemoryStore {
  fn backend(&self) -> &'static str {
    "memory"
  }

  async fn list(&self) -> Result<Vec<Entry>> {
    let entries = self.entries.read().await;
    Ok(entries.iter().rev().cloned().collect())
  }

  async fn insert(&self, draft: NewEntry) -> Result<Entry> {
    let mut entries = self.entries.write().await;
    let last = entries.last();
    let (id, created_at) = next_stamp(
      last.map(|e| e.id),
      last.map(|e| e.created_at),
      Utc::now(),
    )?;
    let (name, message) = draft.into_parts();
    let entry = Entry {
      id,
      name,
      message,
      created_at,
    };
    entries.push(entry.clone());
    debug!(id, total = entries.len(), "memory guestbook entry stored");
    Ok(entry)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;

  #[tokio::test]
  async fn empty_store_lists_nothing() {
    let store = MemoryStore::new();
    assert!(store.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn newest_entry_comes_first() {
    let store = MemoryStore::new();
    store.append("Ada", "first").await.unwrap();
    store.append("Grace", "second").await.unwrap();
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Grace");
    assert_eq!(listed[1].name, "Ada");
    assert!(listed[0].id > listed[1].id);
  }

  #[tokio::test]
  async fn rejected_append_leaves_store_unchanged() {
    let store = MemoryStore::new();
    store.append("Ada", "Hello").await.unwrap();
    let err = store.append("", "x").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(store.list().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn concurrent_appends_all_land() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let mut handles = Vec::new();
    for i in 0..20 {
      let store = store.clone();
      handles.push(tokio::spawn(async move {
        store.append(&format!("guest{i}"), "hi").await.unwrap()
      }));
    }
    for h in handles {
      h.await.unwrap();
    }
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 20);
    let mut ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 20);
  }
}
