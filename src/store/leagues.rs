//! League documents
//!
//! Leagues are keyed by their exact name. Creation enforces name
//! uniqueness, and joining runs its membership check and append inside a
//! single transaction so concurrent joins cannot lose an update.

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::db::Store;
use super::error::{StoreError, StoreResult};
use super::types::League;

fn league_from_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, i64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_league(
    (name, creator, members_json, created_ms): (String, String, String, i64),
) -> StoreResult<League> {
    let members: Vec<String> = serde_json::from_str(&members_json)?;
    let created_at: DateTime<Utc> = Utc
        .timestamp_millis_opt(created_ms)
        .single()
        .unwrap_or_else(Utc::now);

    Ok(League {
        name,
        creator,
        members,
        created_at,
    })
}

impl Store {
    /// All leagues, oldest first.
    pub async fn leagues(&self) -> StoreResult<Vec<League>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(
            "SELECT name, creator, members, created_at FROM leagues
             ORDER BY created_at ASC, name ASC",
        )?;

        let rows = stmt
            .query_map([], league_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(decode_league).collect()
    }

    /// Look up a league by exact name.
    pub async fn league(&self, name: &str) -> StoreResult<Option<League>> {
        let conn = self.conn.lock().await;

        let row = conn
            .query_row(
                "SELECT name, creator, members, created_at FROM leagues WHERE name = ?",
                params![name],
                league_from_row,
            )
            .optional()?;

        row.map(decode_league).transpose()
    }

    /// Create a league with `creator` as its first member.
    ///
    /// Fails with [`StoreError::LeagueExists`] if the name is taken.
    pub async fn create_league(&self, name: &str, creator: &str) -> StoreResult<League> {
        let now = Utc::now();
        let members = vec![creator.to_string()];
        let members_json = serde_json::to_string(&members)?;

        let conn = self.conn.lock().await;
        let result = conn.execute(
            "INSERT INTO leagues (name, creator, members, created_at)
             VALUES (?, ?, ?, ?)",
            params![name, creator, members_json, now.timestamp_millis()],
        );

        match result {
            Ok(_) => Ok(League {
                name: name.to_string(),
                creator: creator.to_string(),
                members,
                created_at: now,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::LeagueExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append `user` to the league's member list.
    ///
    /// The check and append happen inside one transaction, an atomic
    /// add-to-set.
    pub async fn join_league(&self, name: &str, user: &str) -> StoreResult<League> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let row = tx
            .query_row(
                "SELECT name, creator, members, created_at FROM leagues WHERE name = ?",
                params![name],
                league_from_row,
            )
            .optional()?;

        let mut league = match row {
            Some(row) => decode_league(row)?,
            None => return Err(StoreError::LeagueNotFound(name.to_string())),
        };

        if league.has_member(user) {
            return Err(StoreError::AlreadyMember {
                league: name.to_string(),
                user: user.to_string(),
            });
        }

        league.members.push(user.to_string());
        let members_json = serde_json::to_string(&league.members)?;

        tx.execute(
            "UPDATE leagues SET members = ? WHERE name = ?",
            params![members_json, name],
        )?;
        tx.commit()?;

        Ok(league)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_league_seeds_creator() {
        let store = Store::open_in_memory().unwrap();

        let league = store.create_league("Alpha", "Bob").await.unwrap();
        assert_eq!(league.creator, "Bob");
        assert_eq!(league.members, vec!["Bob"]);

        let loaded = store.league("Alpha").await.unwrap().unwrap();
        assert_eq!(loaded.members, vec!["Bob"]);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_rejected() {
        let store = Store::open_in_memory().unwrap();

        store.create_league("Alpha", "Bob").await.unwrap();
        let err = store.create_league("Alpha", "Carol").await.unwrap_err();
        assert!(matches!(err, StoreError::LeagueExists(_)));

        // The existing league is untouched.
        let loaded = store.league("Alpha").await.unwrap().unwrap();
        assert_eq!(loaded.creator, "Bob");
    }

    #[tokio::test]
    async fn test_join_appends_member() {
        let store = Store::open_in_memory().unwrap();

        store.create_league("Alpha", "Bob").await.unwrap();
        let league = store.join_league("Alpha", "Carol").await.unwrap();
        assert_eq!(league.members, vec!["Bob", "Carol"]);
    }

    #[tokio::test]
    async fn test_join_is_idempotent_for_existing_member() {
        let store = Store::open_in_memory().unwrap();

        store.create_league("Alpha", "Bob").await.unwrap();
        let err = store.join_league("Alpha", "Bob").await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyMember { .. }));

        // Member list is unchanged.
        let loaded = store.league("Alpha").await.unwrap().unwrap();
        assert_eq!(loaded.members, vec!["Bob"]);
    }

    #[tokio::test]
    async fn test_join_missing_league_mutates_nothing() {
        let store = Store::open_in_memory().unwrap();

        let err = store.join_league("Ghost", "Bob").await.unwrap_err();
        assert!(matches!(err, StoreError::LeagueNotFound(_)));
        assert!(store.leagues().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leagues_listed_oldest_first() {
        let store = Store::open_in_memory().unwrap();

        store.create_league("First", "Bob").await.unwrap();
        store.create_league("Second", "Bob").await.unwrap();

        let all = store.leagues().await.unwrap();
        let names: Vec<_> = all.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
