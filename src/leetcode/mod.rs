//! LeetCode stats integration
//!
//! Fetches solved-problem counts for a username from the public
//! leetcode-stats API. The [`StatsProvider`] trait is the seam the sync
//! layer depends on, so tests can swap the HTTP client for a stub.

pub mod client;

pub use client::{StatsClient, StatsClientConfig, StatsResponse};

use async_trait::async_trait;

use crate::store::SolvedCounts;

/// Source of solved-problem counts for a LeetCode username.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Fetch current counts for `username`.
    async fn fetch_stats(&self, username: &str) -> Result<SolvedCounts, StatsError>;
}

/// Errors that can occur while fetching stats
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Stats unavailable for {username}: {status}")]
    Unsuccessful { username: String, status: String },
}
