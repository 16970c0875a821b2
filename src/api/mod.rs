//! LeetBro REST API
//!
//! HTTP API layer for LeetBro, built with Axum.
//!
//! # Endpoints
//!
//! ## Profile
//! - `GET /api/v1/profile` - Get the local profile
//! - `PUT /api/v1/profile` - Replace the local profile
//!
//! ## Members (leaderboard)
//! - `GET /api/v1/members` - List tracked members in rank order
//! - `POST /api/v1/members` - Track a username and fetch its stats
//!
//! ## Leagues
//! - `GET /api/v1/leagues` - List all leagues
//! - `GET /api/v1/leagues/mine` - Leagues a user belongs to
//! - `POST /api/v1/leagues` - Create a league
//! - `POST /api/v1/leagues/:name/join` - Join a league
//!
//! ## Sync
//! - `POST /api/v1/sync` - Refresh every tracked member
//! - `POST /api/v1/sync/:username` - Refresh a single member
//! - `GET /api/v1/sync/status` - Get sync status
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Live leaderboard and league updates

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    let api_routes = Router::new()
        // Profile routes
        .route("/profile", get(routes::profile::get_profile))
        .route("/profile", put(routes::profile::update_profile))
        // Member routes
        .route("/members", get(routes::members::list_members))
        .route("/members", post(routes::members::add_member))
        // League routes
        .route("/leagues", get(routes::leagues::list_leagues))
        .route("/leagues", post(routes::leagues::create_league))
        .route("/leagues/mine", get(routes::leagues::list_my_leagues))
        .route("/leagues/:name/join", post(routes::leagues::join_league))
        // Sync routes
        .route("/sync", post(routes::sync::sync_all))
        .route("/sync/status", get(routes::sync::get_sync_status))
        .route("/sync/:username", post(routes::sync::sync_user))
        .layer(DefaultBodyLimit::max(max_body_size))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("LeetBro API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("LeetBro API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leetcode::{StatsError, StatsProvider};
    use crate::store::{SolvedCounts, Store};
    use crate::sync::{SyncConfig, SyncService};
    use crate::websocket::{ConnectionHub, HubConfig};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    /// Stats provider that resolves every username to fixed counts.
    struct StubStats;

    #[async_trait]
    impl StatsProvider for StubStats {
        async fn fetch_stats(&self, username: &str) -> Result<SolvedCounts, StatsError> {
            if username == "ghost" {
                return Err(StatsError::Unsuccessful {
                    username: username.to_string(),
                    status: "error".to_string(),
                });
            }
            Ok(SolvedCounts {
                easy: 10,
                medium: 5,
                hard: 1,
            })
        }
    }

    fn create_test_app() -> Router {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let sync = Arc::new(SyncService::new(
            Arc::clone(&store),
            Arc::new(StubStats),
            Arc::clone(&hub),
            SyncConfig::default(),
        ));

        let state = AppState::new(store, sync, hub, ApiConfig::default());
        build_router(state)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_profile_defaults() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let profile: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["name"], "New Bro");
        assert_eq!(profile["bio"], "LeetCode Enthusiast");
    }

    #[tokio::test]
    async fn test_update_profile_roundtrip() {
        let app = create_test_app();

        let body = r#"{"name": "alice", "bio": "grinder", "avatar_url": "https://example.com/a.png"}"#;
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/v1/profile", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let profile: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["name"], "alice");
    }

    #[tokio::test]
    async fn test_update_profile_rejects_empty_name() {
        let app = create_test_app();

        let body = r#"{"name": "  ", "bio": "", "avatar_url": ""}"#;
        let response = app
            .oneshot(json_request("PUT", "/api/v1/profile", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_members_empty() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/members")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_member_fetches_stats() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/members",
                r#"{"username": "alice"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let member: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        // 10 easy + 5 medium * 2 + 1 hard * 5
        assert_eq!(member["total_points"], 25);
    }

    #[tokio::test]
    async fn test_add_member_unknown_username() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/members",
                r#"{"username": "ghost"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_league() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues",
                r#"{"name": "algo-grinders", "creator": "alice"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_create_duplicate_league_conflicts() {
        let app = create_test_app();

        let body = r#"{"name": "algo-grinders", "creator": "alice"}"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/leagues", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues",
                r#"{"name": "algo-grinders", "creator": "mallory"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_join_league() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues",
                r#"{"name": "algo-grinders", "creator": "alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues/algo-grinders/join",
                r#"{"user": "bob"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let league: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(league["members"], serde_json::json!(["alice", "bob"]));
    }

    #[tokio::test]
    async fn test_join_league_with_slash_in_name() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues",
                r#"{"name": "algo/bros", "creator": "alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // The name travels as a single percent-encoded path segment.
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues/algo%2Fbros/join",
                r#"{"user": "bob"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let league: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(league["name"], "algo/bros");
        assert_eq!(league["members"], serde_json::json!(["alice", "bob"]));
    }

    #[tokio::test]
    async fn test_join_missing_league() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues/ghosts/join",
                r#"{"user": "bob"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejoin_league_conflicts() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues",
                r#"{"name": "algo-grinders", "creator": "alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/leagues/algo-grinders/join",
                r#"{"user": "alice"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_my_leagues_filter() {
        let app = create_test_app();

        for body in [
            r#"{"name": "algo-grinders", "creator": "alice"}"#,
            r#"{"name": "night-owls", "creator": "bob"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/v1/leagues", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/leagues/mine?user=alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let listing: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["leagues"][0]["name"], "algo-grinders");
    }

    #[tokio::test]
    async fn test_sync_status_before_any_sync() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sync/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let status: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(status["last_sync"].is_null());
    }

    #[tokio::test]
    async fn test_trigger_sync() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/members",
                r#"{"username": "alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sync")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report["synced"], 1);
        assert_eq!(report["failed"], 0);
    }
}
