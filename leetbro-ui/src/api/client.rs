//! HTTP API Client
//!
//! Functions for communicating with the LeetBro REST API.

use gloo_net::http::Request;

use crate::state::global::{League, Member, Profile};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("leetbro_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("leetbro_api_url", url);
        }
    }
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct MemberListResponse {
    pub total: usize,
    pub members: Vec<Member>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LeagueListResponse {
    pub total: usize,
    pub leagues: Vec<League>,
}

/// Report from a full leaderboard refresh
#[derive(Debug, serde::Deserialize)]
pub struct SyncReport {
    pub synced: u32,
    pub failed: u32,
    pub duration_ms: u64,
    #[serde(default)]
    pub results: Vec<MemberSyncResult>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MemberSyncResult {
    pub username: String,
    pub success: bool,
    #[serde(default)]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Error envelope returned by the API
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

/// Extract a readable error message from a failed response
async fn error_message(response: gloo_net::http::Response) -> String {
    match response.json::<ApiErrorResponse>().await {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!("Request failed with status {}", response.status()),
    }
}

// ============ API Functions ============

/// Fetch the local profile
pub async fn fetch_profile() -> Result<Profile, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/profile", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Save the local profile (wholesale replace)
pub async fn save_profile(profile: &Profile) -> Result<Profile, String> {
    let api_base = get_api_base();

    let response = Request::put(&format!("{}/profile", api_base))
        .json(profile)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the leaderboard
pub async fn fetch_members() -> Result<Vec<Member>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/members", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: MemberListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.members)
}

/// Track a new LeetCode username
pub async fn add_member(username: &str) -> Result<Member, String> {
    #[derive(serde::Serialize)]
    struct AddMemberRequest {
        username: String,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/members", api_base))
        .json(&AddMemberRequest {
            username: username.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch all leagues
pub async fn fetch_leagues() -> Result<Vec<League>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/leagues", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: LeagueListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.leagues)
}

/// Create a new league
pub async fn create_league(name: &str, creator: &str) -> Result<League, String> {
    #[derive(serde::Serialize)]
    struct CreateLeagueRequest {
        name: String,
        creator: String,
    }

    let api_base = get_api_base();

    let response = Request::post(&format!("{}/leagues", api_base))
        .json(&CreateLeagueRequest {
            name: name.to_string(),
            creator: creator.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Build the join URL for a league, percent-encoding the name so that
/// characters like `/` survive as a single path segment.
fn join_league_url(api_base: &str, name: &str) -> String {
    format!("{}/leagues/{}/join", api_base, urlencoding::encode(name))
}

/// Join an existing league
pub async fn join_league(name: &str, user: &str) -> Result<League, String> {
    #[derive(serde::Serialize)]
    struct JoinLeagueRequest {
        user: String,
    }

    let api_base = get_api_base();

    let response = Request::post(&join_league_url(&api_base, name))
        .json(&JoinLeagueRequest {
            user: user.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Trigger a full leaderboard refresh
pub async fn trigger_sync() -> Result<SyncReport, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/sync", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();
    let health_url = api_base.replace("/api/v1", "/health");

    let response = Request::get(&health_url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
