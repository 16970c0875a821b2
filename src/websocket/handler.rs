//! WebSocket handler
//!
//! Handles WebSocket upgrade requests and the connection lifecycle. On
//! subscribe, the current collection snapshot is delivered immediately so
//! clients never render an empty view while waiting for the next change.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage, TOPIC_LEADERBOARD, TOPIC_LEAGUES};
use crate::api::AppState;

/// WebSocket upgrade handler, the entry point for live subscriptions.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let hub = Arc::clone(&state.hub);
    let (mut sender, mut receiver) = socket.split();

    // Channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let connected_msg = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    let connected_text = match serde_json::to_string(&connected_msg) {
        Ok(text) => text,
        Err(_) => {
            hub.unregister(&connection_id).await;
            return;
        }
    };
    if sender.send(Message::Text(connected_text)).await.is_err() {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Forward messages from the channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    let state_for_recv = Arc::clone(&state);
    let conn_id_for_recv = connection_id.clone();

    // Receive and handle client messages
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&state_for_recv, &conn_id_for_recv, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    // Cleanup: unregister from hub
    hub.unregister(&connection_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(state: &Arc<AppState>, connection_id: &str, message: Message) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(state, connection_id, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "Invalid client message"
                    );
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = state.hub.send_to(connection_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = state.hub.send_to(connection_id, error_msg).await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(state: &Arc<AppState>, connection_id: &str, message: ClientMessage) {
    match message {
        ClientMessage::Subscribe { topics } => {
            match state.hub.subscribe(connection_id, topics).await {
                Ok(subscribed) => {
                    let response = ServerMessage::Subscribed {
                        topics: subscribed.clone(),
                    };
                    let _ = state.hub.send_to(connection_id, response).await;

                    // New subscribers get the current snapshot right away.
                    for topic in &subscribed {
                        send_initial_snapshot(state, connection_id, topic).await;
                    }
                }
                Err(e) => {
                    tracing::error!(connection_id = %connection_id, error = %e, "Subscribe error");
                    let error_msg = ServerMessage::Error {
                        message: e.to_string(),
                    };
                    let _ = state.hub.send_to(connection_id, error_msg).await;
                }
            }
        }
        ClientMessage::Unsubscribe { topics } => {
            match state.hub.unsubscribe(connection_id, topics).await {
                Ok(unsubscribed) => {
                    let response = ServerMessage::Unsubscribed {
                        topics: unsubscribed,
                    };
                    let _ = state.hub.send_to(connection_id, response).await;
                }
                Err(e) => {
                    tracing::error!(connection_id = %connection_id, error = %e, "Unsubscribe error");
                    let error_msg = ServerMessage::Error {
                        message: e.to_string(),
                    };
                    let _ = state.hub.send_to(connection_id, error_msg).await;
                }
            }
        }
        ClientMessage::Ping => {
            let _ = state.hub.send_to(connection_id, ServerMessage::Pong).await;
        }
    }
}

/// Push the current collection state for a freshly subscribed topic.
async fn send_initial_snapshot(state: &Arc<AppState>, connection_id: &str, topic: &str) {
    let message = match topic {
        TOPIC_LEADERBOARD => match state.store.members_ranked().await {
            Ok(members) => ServerMessage::Leaderboard { members },
            Err(e) => {
                tracing::error!(error = %e, "Failed to load leaderboard snapshot");
                return;
            }
        },
        TOPIC_LEAGUES => match state.store.leagues().await {
            Ok(leagues) => ServerMessage::Leagues { leagues },
            Err(e) => {
                tracing::error!(error = %e, "Failed to load leagues snapshot");
                return;
            }
        },
        _ => return,
    };

    let _ = state.hub.send_to(connection_id, message).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiConfig, AppState};
    use crate::leetcode::{StatsError, StatsProvider};
    use crate::store::{SolvedCounts, Store};
    use crate::sync::{SyncConfig, SyncService};
    use crate::websocket::{ConnectionHub, HubConfig};
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct NoStats;

    #[async_trait]
    impl StatsProvider for NoStats {
        async fn fetch_stats(&self, username: &str) -> Result<SolvedCounts, StatsError> {
            Err(StatsError::Unsuccessful {
                username: username.to_string(),
                status: "error".to_string(),
            })
        }
    }

    fn test_state() -> Arc<AppState> {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let sync = Arc::new(SyncService::new(
            Arc::clone(&store),
            Arc::new(NoStats),
            Arc::clone(&hub),
            SyncConfig::default(),
        ));

        Arc::new(AppState::new(store, sync, hub, ApiConfig::default()))
    }

    #[tokio::test]
    async fn test_subscribe_delivers_current_snapshots() {
        let state = test_state();

        state
            .store
            .upsert_member("alice", SolvedCounts::new(10, 5, 1))
            .await
            .unwrap();
        state
            .store
            .create_league("algo-grinders", "alice")
            .await
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = state.hub.register(tx).await.unwrap();

        handle_client_message(
            &state,
            &id,
            ClientMessage::Subscribe {
                topics: vec![TOPIC_LEADERBOARD.to_string(), TOPIC_LEAGUES.to_string()],
            },
        )
        .await;

        // Confirmation first, then one snapshot per topic, before any
        // mutation happens.
        match rx.recv().await {
            Some(ServerMessage::Subscribed { topics }) => assert_eq!(topics.len(), 2),
            other => panic!("expected subscription confirmation, got {:?}", other),
        }
        match rx.recv().await {
            Some(ServerMessage::Leaderboard { members }) => {
                assert_eq!(members.len(), 1);
                assert_eq!(members[0].username, "alice");
                assert_eq!(members[0].total_points, 25);
            }
            other => panic!("expected leaderboard snapshot, got {:?}", other),
        }
        match rx.recv().await {
            Some(ServerMessage::Leagues { leagues }) => {
                assert_eq!(leagues.len(), 1);
                assert_eq!(leagues[0].members, vec!["alice".to_string()]);
            }
            other => panic!("expected leagues snapshot, got {:?}", other),
        }

        state.hub.unregister(&id).await;
    }

    #[tokio::test]
    async fn test_subscribe_to_empty_collections_still_sends_snapshots() {
        let state = test_state();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = state.hub.register(tx).await.unwrap();

        handle_client_message(
            &state,
            &id,
            ClientMessage::Subscribe {
                topics: vec![TOPIC_LEADERBOARD.to_string()],
            },
        )
        .await;

        match rx.recv().await {
            Some(ServerMessage::Subscribed { .. }) => {}
            other => panic!("expected subscription confirmation, got {:?}", other),
        }
        match rx.recv().await {
            Some(ServerMessage::Leaderboard { members }) => assert!(members.is_empty()),
            other => panic!("expected empty leaderboard snapshot, got {:?}", other),
        }

        state.hub.unregister(&id).await;
    }
}
