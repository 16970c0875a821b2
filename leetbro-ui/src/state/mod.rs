//! State Management
//!
//! Global application state and WebSocket connection management.

pub mod global;
pub mod websocket;

pub use global::{provide_global_state, GlobalState, League, Member, Profile};
pub use websocket::{WebSocketClient, WsMessage};
