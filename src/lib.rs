//! # LeetBro
//!
//! LeetCode progress tracking for friend groups - a full-stack Rust
//! application with a weighted-points leaderboard and joinable leagues.
//!
//! ## Features
//!
//! - **Profile**: A single local profile with avatar and social links
//! - **Leaderboard**: Tracked usernames ranked by weighted points
//!   (easy = 1, medium = 2, hard = 5)
//! - **Stats sync**: Scores pulled from the public LeetCode stats API,
//!   per user or as a full batch with per-member outcomes
//! - **Leagues**: Named groups users can create and join
//! - **Real-time**: WebSocket push of leaderboard and league snapshots
//!
//! ## Modules
//!
//! - [`store`]: SQLite-backed store for profiles, members and leagues
//! - [`leetcode`]: Stats API client behind the [`leetcode::StatsProvider`] seam
//! - [`sync`]: Leaderboard refresh, manual and background
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live update hub and connection handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leetbro::api::{serve, ApiConfig, AppState};
//! use leetbro::leetcode::{StatsClient, StatsClientConfig};
//! use leetbro::store::Store;
//! use leetbro::sync::{SyncConfig, SyncService};
//! use leetbro::websocket::{ConnectionHub, HubConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open_in_memory()?);
//!     let stats = Arc::new(StatsClient::new(StatsClientConfig::default()));
//!     let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
//!     let sync = Arc::new(SyncService::new(
//!         Arc::clone(&store),
//!         stats,
//!         Arc::clone(&hub),
//!         SyncConfig::default(),
//!     ));
//!
//!     let config = ApiConfig::default();
//!     let state = AppState::new(store, sync, hub, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod leetcode;
pub mod store;
pub mod sync;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{League, Member, Profile, SolvedCounts, Store, StoreError, StoreResult};

pub use leetcode::{StatsClient, StatsClientConfig, StatsError, StatsProvider};

pub use sync::{MemberSyncResult, SyncError, SyncReport, SyncService, SyncState};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent,
};

pub use config::{Config, ConfigError, LoggingConfig};
