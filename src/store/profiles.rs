//! Profile document access
//!
//! A single profile document lives under the fixed key `me`. Loading a
//! missing document is not an error: callers fall back to
//! `Profile::default()` without writing the defaults back.

use rusqlite::{params, OptionalExtension};

use super::db::Store;
use super::error::StoreResult;
use super::types::Profile;

/// Fixed key of the one-and-only profile document.
pub const PROFILE_KEY: &str = "me";

impl Store {
    /// Load the profile document, or `None` if it was never saved.
    pub async fn profile(&self) -> StoreResult<Option<Profile>> {
        let conn = self.conn.lock().await;

        let doc: Option<String> = conn
            .query_row(
                "SELECT doc FROM profiles WHERE key = ?",
                params![PROFILE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match doc {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the profile document wholesale.
    pub async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        let doc = serde_json::to_string(profile)?;

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO profiles (key, doc) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET doc = excluded.doc",
            params![PROFILE_KEY, doc],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_profile() {
        let store = Store::open_in_memory().unwrap();

        let mut profile = Profile::default();
        profile.name = "Bob".to_string();
        profile.github = "https://github.com/bob".to_string();

        store.save_profile(&profile).await.unwrap();

        let loaded = store.profile().await.unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let store = Store::open_in_memory().unwrap();

        let mut first = Profile::default();
        first.github = "https://github.com/bob".to_string();
        store.save_profile(&first).await.unwrap();

        // A later save with an empty github link must not keep the old one.
        let second = Profile::default();
        store.save_profile(&second).await.unwrap();

        let loaded = store.profile().await.unwrap().unwrap();
        assert!(loaded.github.is_empty());
    }
}
