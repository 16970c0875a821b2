//! WebSocket message types
//!
//! Messages exchanged between browser clients and the LeetBro server.
//! Server pushes are full-collection snapshots: any change to the member
//! or league collections re-delivers the whole ordered set.

use serde::{Deserialize, Serialize};

use crate::store::{League, Member};

/// Topic carrying ranked leaderboard snapshots.
pub const TOPIC_LEADERBOARD: &str = "leaderboard";
/// Topic carrying league-list snapshots.
pub const TOPIC_LEAGUES: &str = "leagues";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for live snapshots
    Subscribe { topics: Vec<String> },
    /// Unsubscribe from topics
    Unsubscribe { topics: Vec<String> },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full leaderboard, ordered by total points descending
    Leaderboard { members: Vec<Member> },
    /// Full league list
    Leagues { leagues: Vec<League> },
    /// Subscription confirmed
    Subscribed { topics: Vec<String> },
    /// Unsubscription confirmed
    Unsubscribed { topics: Vec<String> },
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
    /// Connection established
    Connected { connection_id: String },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    /// Snapshot of the ranked member collection.
    pub fn leaderboard(members: Vec<Member>) -> Self {
        Self {
            topic: TOPIC_LEADERBOARD.to_string(),
            message: ServerMessage::Leaderboard { members },
        }
    }

    /// Snapshot of the league collection.
    pub fn leagues(leagues: Vec<League>) -> Self {
        Self {
            topic: TOPIC_LEAGUES.to_string(),
            message: ServerMessage::Leagues { leagues },
        }
    }
}
