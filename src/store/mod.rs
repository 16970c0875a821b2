//! LeetBro document store
//!
//! SQLite-backed persistence for the three collections:
//!
//! - **profiles**: the single local profile document under key `me`
//! - **members**: tracked LeetCode accounts with cached solved counts
//! - **leagues**: named groups keyed by their exact name
//!
//! The store owns all entities; API handlers and the sync service hold a
//! shared `Arc<Store>` and read/write through it. Subscribers get full
//! collection snapshots from the WebSocket layer after each mutation.

pub mod db;
pub mod error;
pub mod leagues;
pub mod members;
pub mod profiles;
pub mod types;

pub use db::Store;
pub use error::{StoreError, StoreResult};
pub use profiles::PROFILE_KEY;
pub use types::{
    League, Member, Profile, SolvedCounts, my_leagues, points, EASY_WEIGHT, HARD_WEIGHT,
    MEDIUM_WEIGHT,
};
