//! Guestbook append-log: one capability trait, several backends.
//!
//! Every backend returns entries newest-first from [`GuestbookStore::list`]
//! and only persists input that passed [`NewEntry`] validation.

use crate::{
  error::{Error, Result},
  models::guestbook::{entry::Entry, new_entry::NewEntry},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod file;
pub mod memory;
pub mod remote;
pub mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait GuestbookStore: Send + Sync {
  /// Short backend name for logs and the health endpoint.
  fn backend(&self) -> &'static str;

  /// All entries, newest first. An empty store yields an empty vector.
  async fn list(&self) -> Result<Vec<Entry>>;

  /// Persist a validated entry, assigning its id and timestamp.
  async fn insert(&self, draft: NewEntry) -> Result<Entry>;

  /// Validate `name`/`message` and persist them. Nothing is written when
  /// validation fails.
  async fn append(&self, name: &str, message: &str) -> Result<Entry> {
    let draft = NewEntry::new(name, message)?;
    self.insert(draft).await
  }
}

/// Id and timestamp for the next locally-numbered entry.
///
/// Ids come from the creation time in milliseconds and are bumped past
/// `max_id`; timestamps never go backwards relative to `latest`. An id
/// space exhausted at `i64::MAX` is a storage fault.
pub(crate) fn next_stamp(
  max_id: Option<i64>,
  latest: Option<DateTime<Utc>>,
  now: DateTime<Utc>,
) -> Result<(i64, DateTime<Utc>)> {
  let floor = match max_id {
    None => i64::MIN,
    Some(id) => id
      .checked_add(1)
      .ok_or_else(|| Error::storage("guestbook id space exhausted"))?,
  };
  let created_at = latest.map_or(now, |t| now.max(t));
  Ok((now.timestamp_millis().max(floor), created_at))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
  }

  #[test]
  fn first_stamp_uses_clock() {
    let (id, ts) = next_stamp(None, None, at(1_000)).unwrap();
    assert_eq!(id, 1_000);
    assert_eq!(ts, at(1_000));
  }

  #[test]
  fn same_millisecond_bumps_id() {
    let (id, ts) = next_stamp(Some(1_000), Some(at(1_000)), at(1_000)).unwrap();
    assert_eq!(id, 1_001);
    assert_eq!(ts, at(1_000));
  }

  #[test]
  fn clock_step_back_keeps_order() {
    let (id, ts) =
      next_stamp(Some(5_000), Some(at(5_000)), at(5_000) - Duration::seconds(3)).unwrap();
    assert_eq!(id, 5_001);
    assert_eq!(ts, at(5_000));
  }

  #[test]
  fn id_floor_and_time_floor_are_independent() {
    let (id, ts) = next_stamp(Some(9_000_000), Some(at(2_000)), at(1_000)).unwrap();
    assert_eq!(id, 9_000_001);
    assert_eq!(ts, at(2_000));
  }

  #[test]
  fn exhausted_id_space_is_storage_error() {
    let err = next_stamp(Some(i64::MAX), Some(at(1_000)), at(1_000)).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
  }
}
