//! Member rows and the ranked leaderboard
//!
//! One row per tracked LeetCode username. The total-points column is
//! derived from the solved counts on every write; concurrent syncs of the
//! same username resolve last-writer-wins because the upsert is a single
//! statement.

use rusqlite::{params, OptionalExtension, Row};

use super::db::Store;
use super::error::StoreResult;
use super::types::{Member, SolvedCounts};

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        username: row.get(1)?,
        easy_solved: row.get(2)?,
        medium_solved: row.get(3)?,
        hard_solved: row.get(4)?,
        total_points: row.get(5)?,
    })
}

const MEMBER_COLUMNS: &str =
    "id, username, easy_solved, medium_solved, hard_solved, total_points";

impl Store {
    /// All members ordered by total points descending.
    ///
    /// Ties break on username so the ordering is stable across snapshots.
    pub async fn members_ranked(&self) -> StoreResult<Vec<Member>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members
             ORDER BY total_points DESC, username ASC"
        ))?;

        let members = stmt
            .query_map([], member_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }

    /// Look up a member by exact username.
    pub async fn find_member(&self, username: &str) -> StoreResult<Option<Member>> {
        let conn = self.conn.lock().await;

        let member = conn
            .query_row(
                &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE username = ?"),
                params![username],
                member_from_row,
            )
            .optional()?;

        Ok(member)
    }

    /// Record fresh solved counts for `username`.
    ///
    /// Updates the existing row matched by username or creates a new one;
    /// the weighted score is recomputed from the counts either way.
    pub async fn upsert_member(
        &self,
        username: &str,
        counts: SolvedCounts,
    ) -> StoreResult<Member> {
        let total = counts.points();

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO members
                 (username, easy_solved, medium_solved, hard_solved, total_points)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(username) DO UPDATE SET
                 easy_solved   = excluded.easy_solved,
                 medium_solved = excluded.medium_solved,
                 hard_solved   = excluded.hard_solved,
                 total_points  = excluded.total_points",
            params![username, counts.easy, counts.medium, counts.hard, total],
        )?;

        let member = conn.query_row(
            &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE username = ?"),
            params![username],
            member_from_row,
        )?;

        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_creates_then_updates_in_place() {
        let store = Store::open_in_memory().unwrap();

        let created = store
            .upsert_member("alice", SolvedCounts::new(10, 5, 1))
            .await
            .unwrap();
        assert_eq!(created.total_points, 25);

        let updated = store
            .upsert_member("alice", SolvedCounts::new(12, 5, 1))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.easy_solved, 12);
        assert_eq!(updated.total_points, 27);

        // No duplicate row was created.
        assert_eq!(store.members_ranked().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_leaderboard_ordering() {
        let store = Store::open_in_memory().unwrap();

        store
            .upsert_member("low", SolvedCounts::new(1, 0, 0))
            .await
            .unwrap();
        store
            .upsert_member("high", SolvedCounts::new(0, 0, 10))
            .await
            .unwrap();
        store
            .upsert_member("mid", SolvedCounts::new(0, 5, 0))
            .await
            .unwrap();

        let ranked = store.members_ranked().await.unwrap();
        let names: Vec<_> = ranked.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[tokio::test]
    async fn test_find_member() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.find_member("ghost").await.unwrap().is_none());

        store
            .upsert_member("alice", SolvedCounts::default())
            .await
            .unwrap();
        let found = store.find_member("alice").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.total_points, 0);
    }
}
