//! Profile Routes
//!
//! Endpoints for the single local user profile.
//!
//! - GET /api/v1/profile - Get the profile (defaults when none saved yet)
//! - PUT /api/v1/profile - Replace the profile wholesale

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::Profile;

/// GET /api/v1/profile
///
/// Returns the saved profile, or the default profile when nothing has
/// been saved yet. A missing profile is not an error.
pub async fn get_profile(State(state): State<Arc<AppState>>) -> ApiResult<Json<Profile>> {
    let profile = state.store.profile().await?.unwrap_or_default();
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Replaces the stored profile with the request body. Partial updates are
/// not supported; clients send the full document.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<Profile>,
) -> ApiResult<Json<Profile>> {
    if profile.name.trim().is_empty() {
        return Err(ApiError::Validation("Profile name cannot be empty".to_string()));
    }

    state.store.save_profile(&profile).await?;
    tracing::info!(name = %profile.name, "Profile updated");

    Ok(Json(profile))
}
