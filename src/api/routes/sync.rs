//! Sync Routes
//!
//! Endpoints for refreshing leaderboard stats from the LeetCode stats API.
//!
//! - POST /api/v1/sync - Refresh every tracked member
//! - POST /api/v1/sync/:username - Refresh a single member
//! - GET /api/v1/sync/status - Get sync status

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::TimeZone;
use std::sync::Arc;

use crate::api::dto::SyncStatusResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::Member;
use crate::sync::SyncReport;

/// POST /api/v1/sync
///
/// Refresh every tracked member. Individual failures are reported in the
/// per-member results rather than failing the whole request.
pub async fn sync_all(State(state): State<Arc<AppState>>) -> ApiResult<Json<SyncReport>> {
    let report = state.sync.sync_all().await?;

    tracing::info!(
        synced = report.synced,
        failed = report.failed,
        duration_ms = report.duration_ms,
        "Manual leaderboard refresh completed"
    );

    Ok(Json(report))
}

/// POST /api/v1/sync/:username
///
/// Refresh a single member. Adds the username to the leaderboard if it is
/// not tracked yet.
pub async fn sync_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<Member>> {
    let member = state.sync.sync_user(&username).await?;
    Ok(Json(member))
}

/// GET /api/v1/sync/status
///
/// Get the current sync status including the last refresh report.
pub async fn get_sync_status(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SyncStatusResponse>> {
    let sync_state = state.sync.get_status().await;

    let last_sync = if sync_state.last_sync_timestamp > 0 {
        chrono::Utc
            .timestamp_millis_opt(sync_state.last_sync_timestamp)
            .single()
            .map(|dt| dt.to_rfc3339())
    } else {
        None
    };

    Ok(Json(SyncStatusResponse {
        background_enabled: state.sync.is_enabled(),
        last_sync,
        last_report: sync_state.last_report,
    }))
}
