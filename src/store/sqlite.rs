//! Guestbook table in SQLite.
//!
//! Rows are listed by `id DESC`. Inserts go through a per-store lock and
//! clamp `created_at` to the newest row's timestamp, so id order and
//! timestamp order agree even if the clock steps back.

use super::GuestbookStore;
use crate::{
  db,
  error::Result,
  models::guestbook::{entry::Entry, new_entry::NewEntry},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SqliteStore {
  pool: SqlitePool,
  write_lock: Arc<Mutex<()>>,
}

impl SqliteStore {
  /// Open (creating if needed) the database at `db_url` and migrate it.
  pub async fn connect(db_url: &str) -> Result<Self> {
    db::ensure_sqlite_path(db_url)?;
    let options = if db::is_memory_url(db_url) {
      // Each connection to an in-memory database sees its own copy, and the
      // copy dies with the connection: keep exactly one, forever.
      SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
    } else {
      SqlitePoolOptions::new().max_connections(5)
    };
    let pool = options.connect(db_url).await?;
    Self::from_pool(pool).await
  }

  pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
    db::run_migrations(&pool).await?;
    Ok(Self {
      pool,
      write_lock: Arc::new(Mutex::new(())),
    })
  }
}

#[async_trait]
impl GuestbookStore for SqliteStore {
  fn backend(&self) -> &'static str {
    "sqlite"
  }

  async fn list(&self) -> Result<Vec<Entry>> {
    let rows = sqlx::query_as::<_, Entry>(
      "SELECT id, name, message, created_at FROM guestbook ORDER BY id DESC",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(rows)
  }

  async fn insert(&self, draft: NewEntry) -> Result<Entry> {
    let _guard = self.write_lock.lock().await;
    let latest: Option<DateTime<Utc>> =
      sqlx::query_scalar("SELECT created_at FROM guestbook ORDER BY id DESC LIMIT 1")
        .fetch_optional(&self.pool)
        .await?;
    let now = Utc::now();
    let created_at = latest.map_or(now, |t| now.max(t));

    let entry = sqlx::query_as::<_, Entry>(
      "INSERT INTO guestbook (name, message, created_at) VALUES (?, ?, ?) RETURNING id, name, message, created_at",
    )
    .bind(draft.name())
    .bind(draft.message())
    .bind(created_at)
    .fetch_one(&self.pool)
    .await?;
    info!(id = entry.id, "guestbook row inserted");
    Ok(entry)
  }
}
