//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::store::{League, Member};
use crate::sync::SyncReport;

// ============================================
// MEMBER DTOs
// ============================================

/// Request to start tracking a new LeetCode username
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// LeetCode username to track
    pub username: String,
}

/// Leaderboard listing, already in rank order
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub total: usize,
    pub members: Vec<Member>,
}

// ============================================
// LEAGUE DTOs
// ============================================

/// Request to create a league
#[derive(Debug, Deserialize)]
pub struct CreateLeagueRequest {
    /// League name, also its unique identifier
    pub name: String,
    /// Display name of the creator, seeded as the first member
    pub creator: String,
}

/// Request to join a league
#[derive(Debug, Deserialize)]
pub struct JoinLeagueRequest {
    /// Display name of the joining user
    pub user: String,
}

/// League listing
#[derive(Debug, Serialize)]
pub struct LeagueListResponse {
    pub total: usize,
    pub leagues: Vec<League>,
}

/// Query parameters for the my-leagues listing
#[derive(Debug, Deserialize)]
pub struct MyLeaguesQuery {
    /// Display name to filter league membership by
    pub user: String,
}

// ============================================
// SYNC DTOs
// ============================================

/// Sync status response
#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    /// Whether background refresh is enabled
    pub background_enabled: bool,
    /// RFC 3339 timestamp of the last full refresh, if any
    pub last_sync: Option<String>,
    /// Report of the last full refresh
    pub last_report: Option<SyncReport>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Store component status
    pub store: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
