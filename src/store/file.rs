//! Guestbook kept in a single JSON file.
//!
//! The file holds a JSON array of entries, oldest first. Every append
//! rewrites the whole file. Appends through one `FileStore` are serialized
//! by a mutex and land via write-to-temp + rename, so readers never see a
//! partial file. Two processes sharing the same file are still
//! last-writer-wins.

use super::{next_stamp, GuestbookStore};
use crate::{
  error::{Error, Result},
  models::guestbook::{
    entry::{sort_newest_first, Entry},
    new_entry::NewEntry,
  },
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::{info, warn};

#[derive(Debug)]
pub struct FileStore {
  path: PathBuf,
  write_lock: Mutex<()>,
}

enum Snapshot {
  Missing,
  Parsed(Vec<Entry>),
  Corrupt(serde_json::Error),
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Mutex::new(()),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn load(&self) -> Result<Snapshot> {
    let bytes = match fs::read(&self.path).await {
      Ok(b) => b,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::Missing),
      Err(e) => return Err(e.into()),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Snapshot::Missing);
    }
    Ok(match serde_json::from_slice::<Vec<Entry>>(&bytes) {
      Ok(entries) => Snapshot::Parsed(entries),
      Err(e) => Snapshot::Corrupt(e),
    })
  }

  async fn write_all(&self, entries: &[Entry]) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).await?;
      }
    }
    let body = serde_json::to_vec_pretty(entries)?;
    let tmp = temp_path(&self.path);
    let replaced = match fs::write(&tmp, body).await {
      Ok(()) => fs::rename(&tmp, &self.path).await,
      Err(e) => Err(e),
    };
    if let Err(e) = replaced {
      let _ = fs::remove_file(&tmp).await;
      return Err(e.into());
    }
    Ok(())
  }
}

fn temp_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_owned();
  name.push(".tmp");
  PathBuf::from(name)
}

#[async_trait]
impl GuestbookStore for FileStore {
  fn backend(&self) -> &'static str {
    "file"
  }

  async fn list(&self) -> Result<Vec<Entry>> {
    let mut entries = match self.load().await? {
      Snapshot::Missing => Vec::new(),
      Snapshot::Parsed(entries) => entries,
      Snapshot::Corrupt(e) => {
        warn!(path = %self.path.display(), "guestbook file unreadable, treating as empty: {e}");
        Vec::new()
      }
    };
    sort_newest_first(&mut entries);
    Ok(entries)
  }

  async fn insert(&self, draft: NewEntry) -> Result<Entry> {
    let _guard = self.write_lock.lock().await;

    let mut entries = match self.load().await? {
      Snapshot::Missing => Vec::new(),
      Snapshot::Parsed(entries) => entries,
      Snapshot::Corrupt(e) => {
        return Err(Error::storage(format!(
          "refusing to overwrite unparseable guestbook file {}: {e}",
          self.path.display()
        )));
      }
    };

    let max_id = entries.iter().map(|e| e.id).max();
    let latest = entries.iter().map(|e| e.created_at).max();
    let (id, created_at) = next_stamp(max_id, latest, Utc::now())?;
    let (name, message) = draft.into_parts();
    let entry = Entry {
      id,
      name,
      message,
      created_at,
    };
    entries.push(entry.clone());
    self.write_all(&entries).await?;

    info!(id, path = %self.path.display(), "guestbook entry written");
    Ok(entry)
  }
}
