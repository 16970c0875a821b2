//! Core document types
//!
//! The three collections LeetBro persists: a single profile document,
//! one member row per tracked LeetCode username, and named leagues.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weight applied to each easy problem solved.
pub const EASY_WEIGHT: u32 = 1;
/// Weight applied to each medium problem solved.
pub const MEDIUM_WEIGHT: u32 = 2;
/// Weight applied to each hard problem solved.
pub const HARD_WEIGHT: u32 = 5;

/// Weighted score used to rank members.
///
/// Recomputed from the full counts on every sync, never incrementally
/// maintained.
pub fn points(easy: u32, medium: u32, hard: u32) -> u32 {
    easy * EASY_WEIGHT + medium * MEDIUM_WEIGHT + hard * HARD_WEIGHT
}

/// The single local user profile, stored wholesale under a fixed key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub linkedin: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "New Bro".to_string(),
            bio: "LeetCode Enthusiast".to_string(),
            avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=LeetBro".to_string(),
            github: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
        }
    }
}

/// A tracked LeetCode account with its cached solved counts and derived score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub total_points: u32,
}

/// Solved-problem counts as reported by the stats API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolvedCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl SolvedCounts {
    pub fn new(easy: u32, medium: u32, hard: u32) -> Self {
        Self { easy, medium, hard }
    }

    /// Derived weighted score for these counts.
    pub fn points(&self) -> u32 {
        points(self.easy, self.medium, self.hard)
    }
}

/// A named group of users, keyed by its exact name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    pub creator: String,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl League {
    /// Exact, case-sensitive membership check.
    pub fn has_member(&self, user: &str) -> bool {
        self.members.iter().any(|m| m == user)
    }
}

/// Leagues containing `user`, preserving input order.
pub fn my_leagues<'a>(leagues: &'a [League], user: &str) -> Vec<&'a League> {
    leagues.iter().filter(|l| l.has_member(user)).collect()
}
