//! A stored guestbook entry, as persisted and as exposed over the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub message: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Sort newest-first: descending `created_at`, ties broken by descending `id`.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
