//! WebSocket live update layer
//!
//! Pushes full leaderboard and league snapshots to subscribed clients
//! whenever the underlying collections change. Clients subscribe to the
//! `leaderboard` and `leagues` topics and always receive the complete
//! current state, so no delta reconciliation is needed on the UI side.

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, HubConfig, HubError};
pub use messages::{
    ClientMessage, ServerMessage, WsEvent, TOPIC_LEADERBOARD, TOPIC_LEAGUES,
};
