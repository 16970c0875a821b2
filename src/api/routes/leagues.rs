//! League Routes
//!
//! Endpoints for creating, joining and listing leagues.
//!
//! - GET /api/v1/leagues - List all leagues, oldest first
//! - GET /api/v1/leagues/mine - Leagues a user belongs to
//! - POST /api/v1/leagues - Create a league
//! - POST /api/v1/leagues/:name/join - Join an existing league

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateLeagueRequest, JoinLeagueRequest, LeagueListResponse, MyLeaguesQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{my_leagues, League};
use crate::websocket::WsEvent;

/// GET /api/v1/leagues
///
/// List all leagues, oldest first.
pub async fn list_leagues(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LeagueListResponse>> {
    let leagues = state.store.leagues().await?;

    Ok(Json(LeagueListResponse {
        total: leagues.len(),
        leagues,
    }))
}

/// GET /api/v1/leagues/mine?user=NAME
///
/// List the leagues whose member list contains the given display name.
/// Membership matching is exact and case-sensitive.
pub async fn list_my_leagues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MyLeaguesQuery>,
) -> ApiResult<Json<LeagueListResponse>> {
    let leagues = state.store.leagues().await?;
    let mine: Vec<League> = my_leagues(&leagues, &query.user).into_iter().cloned().collect();

    Ok(Json(LeagueListResponse {
        total: mine.len(),
        leagues: mine,
    }))
}

/// POST /api/v1/leagues
///
/// Create a new league with the creator as its first member. Returns 409
/// if a league with that name already exists; an existing league is never
/// overwritten.
pub async fn create_league(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLeagueRequest>,
) -> ApiResult<(StatusCode, Json<League>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("League name cannot be empty".to_string()));
    }
    let creator = req.creator.trim();
    if creator.is_empty() {
        return Err(ApiError::Validation("Creator name cannot be empty".to_string()));
    }

    let league = state.store.create_league(name, creator).await?;
    tracing::info!(league = %league.name, creator = %creator, "League created");

    publish_leagues(&state).await;

    Ok((StatusCode::CREATED, Json(league)))
}

/// POST /api/v1/leagues/:name/join
///
/// Add a user to an existing league. Returns 404 for an unknown league
/// and 409 when the user is already a member; the membership list is
/// unchanged in both cases.
pub async fn join_league(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<JoinLeagueRequest>,
) -> ApiResult<Json<League>> {
    let user = req.user.trim();
    if user.is_empty() {
        return Err(ApiError::Validation("User name cannot be empty".to_string()));
    }

    let league = state.store.join_league(&name, user).await?;
    tracing::info!(league = %league.name, user = %user, "User joined league");

    publish_leagues(&state).await;

    Ok(Json(league))
}

/// Broadcast the full league list to live subscribers.
async fn publish_leagues(state: &Arc<AppState>) {
    match state.store.leagues().await {
        Ok(leagues) => state.hub.publish(WsEvent::leagues(leagues)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load leagues for broadcast");
        }
    }
}
