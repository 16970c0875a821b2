//! SQLite-backed document store
//!
//! All persistent state lives here: the profile document, the tracked
//! member rows, and the league documents. The profile and league member
//! lists are stored as JSON document columns; members are plain rows so
//! the leaderboard ordering can lean on an index.

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::error::{StoreError, StoreResult};

/// Handle to the LeetBro document store.
///
/// The connection is guarded by an async mutex so axum handlers and the
/// background sync task can share one `Store` behind an `Arc`.
pub struct Store {
    pub(super) conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    /// Create or open the store at `data_dir/leetbro.db`.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = data_dir.join("leetbro.db");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Self::init(conn, Some(path))
    }

    /// Open an in-memory store. Used by tests and `--ephemeral` runs.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        // Configure for performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS profiles (
                key  TEXT PRIMARY KEY,
                doc  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS members (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                username      TEXT NOT NULL UNIQUE,
                easy_solved   INTEGER NOT NULL DEFAULT 0,
                medium_solved INTEGER NOT NULL DEFAULT 0,
                hard_solved   INTEGER NOT NULL DEFAULT 0,
                total_points  INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_members_points
                ON members(total_points DESC);

            CREATE TABLE IF NOT EXISTS leagues (
                name       TEXT PRIMARY KEY,
                creator    TEXT NOT NULL,
                members    TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the backing database file, if on disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lightweight probe used by the readiness check.
    pub async fn ping(&self) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        assert!(store.path().unwrap().exists());
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.path().is_none());
        store.ping().await.unwrap();
    }
}
