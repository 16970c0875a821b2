//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::leetcode::StatsError;
use crate::store::StoreError;
use crate::sync::SyncError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store layer error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Upstream stats API error
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SyncError> for ApiError {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Stats(e) => ApiError::Stats(e),
            SyncError::Store(e) => ApiError::Store(e),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(e) => match e {
                StoreError::LeagueNotFound(_) => (StatusCode::NOT_FOUND, "LEAGUE_NOT_FOUND"),
                StoreError::LeagueExists(_) => (StatusCode::CONFLICT, "LEAGUE_EXISTS"),
                StoreError::AlreadyMember { .. } => (StatusCode::CONFLICT, "ALREADY_MEMBER"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            },
            ApiError::Stats(e) => match e {
                StatsError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
                StatsError::Unsuccessful { .. } => (StatusCode::NOT_FOUND, "STATS_UNAVAILABLE"),
                _ => (StatusCode::BAD_GATEWAY, "STATS_API_ERROR"),
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_conflicts_map_to_409() {
        let exists: ApiError = StoreError::LeagueExists("algo-grinders".to_string()).into();
        let response = exists.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let member: ApiError = StoreError::AlreadyMember {
            league: "algo-grinders".to_string(),
            user: "alice".to_string(),
        }
        .into();
        let response = member.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_league_not_found_maps_to_404() {
        let err: ApiError = StoreError::LeagueNotFound("ghosts".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_stats_failure_maps_to_bad_gateway() {
        let err: ApiError = StatsError::Api("boom".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
