//! Leaderboard sync
//!
//! Pulls solved-problem counts from the LeetCode stats API, recomputes
//! weighted points, and writes the results into the member store. A full
//! refresh walks every tracked member and reports a per-member outcome, so
//! one failing username never aborts the rest of the batch.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::leetcode::{StatsError, StatsProvider};
use crate::store::{Member, Store, StoreError};
use crate::websocket::{ConnectionHub, WsEvent};

/// Configuration for sync behavior
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How often the background refresh runs (in minutes)
    pub refresh_interval_minutes: u64,
    /// Whether the background refresh is enabled
    pub background_enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 30,
            background_enabled: false,
        }
    }
}

/// Current state of the sync service
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncState {
    /// Timestamp of the last completed full refresh (millis)
    pub last_sync_timestamp: i64,
    /// Report of the last full refresh, if one has run
    pub last_report: Option<SyncReport>,
}

/// Outcome of a full leaderboard refresh
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// When the refresh completed (millis)
    pub timestamp: i64,
    /// Number of members refreshed successfully
    pub synced: u32,
    /// Number of members that failed
    pub failed: u32,
    /// How long the refresh took
    pub duration_ms: u64,
    /// Per-member outcomes, in leaderboard order
    pub results: Vec<MemberSyncResult>,
}

/// Outcome of refreshing a single member
#[derive(Debug, Clone, Serialize)]
pub struct MemberSyncResult {
    pub username: String,
    pub success: bool,
    /// Recomputed points when the refresh succeeded
    pub total_points: Option<u32>,
    /// Error message when it failed
    pub error: Option<String>,
}

/// Errors from sync operations
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("stats fetch failed: {0}")]
    Stats(#[from] StatsError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Syncs member stats from the LeetCode stats API into the store
pub struct SyncService {
    store: Arc<Store>,
    stats: Arc<dyn StatsProvider>,
    hub: Arc<ConnectionHub>,
    state: RwLock<SyncState>,
    config: SyncConfig,
}

impl SyncService {
    /// Create a new sync service
    pub fn new(
        store: Arc<Store>,
        stats: Arc<dyn StatsProvider>,
        hub: Arc<ConnectionHub>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            stats,
            hub,
            state: RwLock::new(SyncState::default()),
            config,
        }
    }

    /// Fetch fresh stats for one username and upsert it into the leaderboard.
    ///
    /// Adds the member if the username is not tracked yet; otherwise the
    /// existing row is updated in place. Publishes a fresh leaderboard
    /// snapshot on success.
    pub async fn sync_user(&self, username: &str) -> Result<Member, SyncError> {
        let counts = self.stats.fetch_stats(username).await?;
        let member = self.store.upsert_member(username, counts).await?;

        tracing::info!(
            username = %member.username,
            total_points = member.total_points,
            "Member synced"
        );

        self.publish_leaderboard().await;
        Ok(member)
    }

    /// Refresh every tracked member from the stats API.
    ///
    /// Members are refreshed sequentially; a failure is recorded in the
    /// report and the batch continues with the next member. The leaderboard
    /// snapshot is published once at the end.
    pub async fn sync_all(&self) -> Result<SyncReport, SyncError> {
        let start = std::time::Instant::now();
        let members = self.store.members_ranked().await?;

        let mut results = Vec::with_capacity(members.len());
        let mut synced = 0u32;
        let mut failed = 0u32;

        for member in &members {
            match self.stats.fetch_stats(&member.username).await {
                Ok(counts) => match self.store.upsert_member(&member.username, counts).await {
                    Ok(updated) => {
                        synced += 1;
                        results.push(MemberSyncResult {
                            username: updated.username,
                            success: true,
                            total_points: Some(updated.total_points),
                            error: None,
                        });
                    }
                    Err(e) => {
                        failed += 1;
                        tracing::warn!(username = %member.username, error = %e, "Failed to store synced stats");
                        results.push(MemberSyncResult {
                            username: member.username.clone(),
                            success: false,
                            total_points: None,
                            error: Some(e.to_string()),
                        });
                    }
                },
                Err(e) => {
                    failed += 1;
                    tracing::warn!(username = %member.username, error = %e, "Failed to fetch stats");
                    results.push(MemberSyncResult {
                        username: member.username.clone(),
                        success: false,
                        total_points: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let report = SyncReport {
            timestamp: Utc::now().timestamp_millis(),
            synced,
            failed,
            duration_ms: start.elapsed().as_millis() as u64,
            results,
        };

        let mut state = self.state.write().await;
        state.last_sync_timestamp = report.timestamp;
        state.last_report = Some(report.clone());
        drop(state);

        if synced > 0 {
            self.publish_leaderboard().await;
        }

        Ok(report)
    }

    /// Start background refresh task
    ///
    /// Spawns a tokio task that runs a full refresh on the configured
    /// interval.
    pub fn start_background_sync(self: Arc<Self>) {
        if !self.config.background_enabled {
            tracing::info!("Background leaderboard refresh disabled");
            return;
        }

        tracing::info!(
            interval_minutes = self.config.refresh_interval_minutes,
            "Starting background leaderboard refresh"
        );

        tokio::spawn(async move {
            let interval =
                std::time::Duration::from_secs(self.config.refresh_interval_minutes * 60);
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                tracing::debug!("Running scheduled leaderboard refresh");
                match self.sync_all().await {
                    Ok(report) => {
                        tracing::info!(
                            synced = report.synced,
                            failed = report.failed,
                            duration_ms = report.duration_ms,
                            "Leaderboard refresh completed"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Leaderboard refresh failed");
                    }
                }
            }
        });
    }

    /// Get current sync status
    pub async fn get_status(&self) -> SyncState {
        self.state.read().await.clone()
    }

    /// Check if the background refresh is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.background_enabled
    }

    async fn publish_leaderboard(&self) {
        match self.store.members_ranked().await {
            Ok(members) => self.hub.publish(WsEvent::leaderboard(members)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load leaderboard for broadcast");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leetcode::StatsError;
    use crate::store::SolvedCounts;
    use crate::websocket::HubConfig;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Stats provider backed by a fixed map; unknown usernames fail.
    struct FixedStats {
        counts: HashMap<String, SolvedCounts>,
    }

    #[async_trait]
    impl StatsProvider for FixedStats {
        async fn fetch_stats(&self, username: &str) -> Result<SolvedCounts, StatsError> {
            self.counts
                .get(username)
                .copied()
                .ok_or_else(|| StatsError::Unsuccessful {
                    username: username.to_string(),
                    status: "error".to_string(),
                })
        }
    }

    fn service_with(counts: HashMap<String, SolvedCounts>) -> (Arc<Store>, SyncService) {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let stats = Arc::new(FixedStats { counts });
        let service = SyncService::new(
            Arc::clone(&store),
            stats,
            hub,
            SyncConfig::default(),
        );
        (store, service)
    }

    fn counts(easy: u32, medium: u32, hard: u32) -> SolvedCounts {
        SolvedCounts { easy, medium, hard }
    }

    #[tokio::test]
    async fn sync_user_adds_new_member() {
        let mut stats = HashMap::new();
        stats.insert("alice".to_string(), counts(10, 5, 1));
        let (store, service) = service_with(stats);

        let member = service.sync_user("alice").await.unwrap();
        assert_eq!(member.username, "alice");
        assert_eq!(member.total_points, 25);

        let members = store.members_ranked().await.unwrap();
        assert_eq!(members.len(), 1);
    }

    #[tokio::test]
    async fn sync_user_updates_existing_member() {
        let mut stats = HashMap::new();
        stats.insert("alice".to_string(), counts(10, 5, 1));
        let (store, service) = service_with(stats);

        let first = service.sync_user("alice").await.unwrap();
        let second = service.sync_user("alice").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.members_ranked().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sync_user_propagates_stats_failure() {
        let (store, service) = service_with(HashMap::new());

        let result = service.sync_user("ghost").await;
        assert!(matches!(result, Err(SyncError::Stats(_))));
        assert!(store.members_ranked().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_all_reports_per_member_outcomes() {
        let mut stats = HashMap::new();
        stats.insert("alice".to_string(), counts(3, 2, 1));
        let (store, service) = service_with(stats);

        store
            .upsert_member("alice", counts(0, 0, 0))
            .await
            .unwrap();
        store
            .upsert_member("ghost", counts(0, 0, 0))
            .await
            .unwrap();

        let report = service.sync_all().await.unwrap();
        assert_eq!(report.synced, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results.len(), 2);

        let alice = report
            .results
            .iter()
            .find(|r| r.username == "alice")
            .unwrap();
        assert!(alice.success);
        assert_eq!(alice.total_points, Some(12));

        let ghost = report
            .results
            .iter()
            .find(|r| r.username == "ghost")
            .unwrap();
        assert!(!ghost.success);
        assert!(ghost.error.is_some());
    }

    #[tokio::test]
    async fn sync_all_records_status() {
        let (_, service) = service_with(HashMap::new());

        assert_eq!(service.get_status().await.last_sync_timestamp, 0);
        service.sync_all().await.unwrap();

        let state = service.get_status().await;
        assert!(state.last_sync_timestamp > 0);
        assert!(state.last_report.is_some());
    }
}
