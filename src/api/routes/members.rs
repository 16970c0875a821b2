//! Member Routes
//!
//! Leaderboard endpoints.
//!
//! - GET /api/v1/members - List tracked members in rank order
//! - POST /api/v1/members - Track a new username and fetch its stats

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{AddMemberRequest, MemberListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::Member;

/// GET /api/v1/members
///
/// List all tracked members, highest points first. Ties are broken by
/// username so the ordering is stable.
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MemberListResponse>> {
    let members = state.store.members_ranked().await?;

    Ok(Json(MemberListResponse {
        total: members.len(),
        members,
    }))
}

/// POST /api/v1/members
///
/// Start tracking a LeetCode username. The stats API is queried
/// immediately, so the member lands on the leaderboard with a real score
/// rather than zeros. Posting an already-tracked username refreshes it in
/// place.
pub async fn add_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("Username cannot be empty".to_string()));
    }

    let member = state.sync.sync_user(username).await?;

    tracing::info!(username = %member.username, total_points = member.total_points, "Member added");

    Ok((StatusCode::CREATED, Json(member)))
}
