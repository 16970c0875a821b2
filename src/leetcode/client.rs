//! HTTP client for the leetcode-stats API
//!
//! Endpoint shape: `GET {base_url}/{username}` returning
//! `{ "status": "success", "easySolved": n, "mediumSolved": n, "hardSolved": n }`.
//! Anything other than a `success` status is treated as a failed fetch.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{StatsError, StatsProvider};
use crate::store::SolvedCounts;

/// Default public stats endpoint.
pub const DEFAULT_BASE_URL: &str = "https://leetcode-stats-api.herokuapp.com";

/// Configuration for the stats client
#[derive(Debug, Clone)]
pub struct StatsClientConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for StatsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed stats provider
pub struct StatsClient {
    client: Client,
    config: StatsClientConfig,
}

impl StatsClient {
    pub fn new(config: StatsClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("LeetBro/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    fn stats_url(&self, username: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(username)
        )
    }
}

/// Raw response body from the stats API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub status: String,
    #[serde(default)]
    pub easy_solved: u32,
    #[serde(default)]
    pub medium_solved: u32,
    #[serde(default)]
    pub hard_solved: u32,
}

impl StatsResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn counts(&self) -> SolvedCounts {
        SolvedCounts::new(self.easy_solved, self.medium_solved, self.hard_solved)
    }
}

#[async_trait]
impl StatsProvider for StatsClient {
    async fn fetch_stats(&self, username: &str) -> Result<SolvedCounts, StatsError> {
        let response = self
            .client
            .get(self.stats_url(username))
            .send()
            .await
            .map_err(|e| StatsError::Api(e.to_string()))?;

        if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(StatsError::RateLimited(retry_after));
        }

        if !response.status().is_success() {
            return Err(StatsError::Api(format!(
                "stats API returned {}",
                response.status()
            )));
        }

        let body: StatsResponse = response
            .json()
            .await
            .map_err(|e| StatsError::Parse(e.to_string()))?;

        if !body.is_success() {
            return Err(StatsError::Unsuccessful {
                username: username.to_string(),
                status: body.status,
            });
        }

        Ok(body.counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "status": "success",
            "easySolved": 10,
            "mediumSolved": 5,
            "hardSolved": 1,
            "totalSolved": 16,
            "ranking": 123456
        }"#;

        let body: StatsResponse = serde_json::from_str(json).unwrap();
        assert!(body.is_success());
        assert_eq!(body.counts(), SolvedCounts::new(10, 5, 1));
        assert_eq!(body.counts().points(), 25);
    }

    #[test]
    fn test_error_status_body() {
        let json = r#"{"status": "error", "message": "user does not exist"}"#;
        let body: StatsResponse = serde_json::from_str(json).unwrap();
        assert!(!body.is_success());
        assert_eq!(body.counts(), SolvedCounts::default());
    }

    #[test]
    fn test_stats_url_encodes_username() {
        let client = StatsClient::new(StatsClientConfig {
            base_url: "https://stats.example.com/".to_string(),
            ..Default::default()
        });

        assert_eq!(
            client.stats_url("lee t"),
            "https://stats.example.com/lee%20t"
        );
    }
}
