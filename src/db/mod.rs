//! SQLite helpers: schema setup and path handling.

use sqlx::SqlitePool;
use std::path::Path;

/// Create the guestbook table if absent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS guestbook (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// True for URLs that name a private in-memory database.
pub fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// Ensure the SQLite file and its parent folder exist for a sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> std::io::Result<()> {
    if !db_url.starts_with("sqlite:") || is_memory_url(db_url) {
        return Ok(());
    }
    let path_part = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path_only = path_part.split_once('?').map_or(path_part, |(p, _)| p);
    if path_only.is_empty() {
        return Ok(());
    }
    let p = Path::new(path_only);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(p)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_are_left_alone() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://:memory:"));
        assert!(ensure_sqlite_path("sqlite::memory:").is_ok());
    }

    #[test]
    fn creates_missing_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("gb.db");
        let url = format!("sqlite://{}?mode=rwc", file.display());
        ensure_sqlite_path(&url).unwrap();
        assert!(file.exists());
    }
}
