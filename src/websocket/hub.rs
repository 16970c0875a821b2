//! WebSocket connection hub
//!
//! Manages all WebSocket connections and their topic subscriptions, and
//! fans snapshot events out to subscribers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, WsEvent, TOPIC_LEADERBOARD, TOPIC_LEAGUES};

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Manages all WebSocket connections and subscriptions
pub struct ConnectionHub {
    /// Active connections: ConnectionId -> ConnectionHandle
    connections: Arc<RwLock<HashMap<ConnectionId, ConnectionHandle>>>,
    /// Topic subscriptions: Topic -> set of ConnectionIds
    subscriptions: Arc<RwLock<HashMap<String, HashSet<ConnectionId>>>>,
    /// Configuration
    config: HubConfig,
}

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 256,
        }
    }
}

/// Handle for sending messages to a specific connection
pub struct ConnectionHandle {
    /// Channel sender for this connection
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    /// Topics this connection is subscribed to
    pub subscriptions: HashSet<String>,
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID, or an error if the connection limit
    /// has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let connections = self.connections.read().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }
        drop(connections);

        let id = Uuid::new_v4().to_string();
        let handle = ConnectionHandle {
            sender,
            subscriptions: HashSet::new(),
        };

        self.connections.write().await.insert(id.clone(), handle);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection and clean up its subscriptions
    ///
    /// Must run on every disconnect so no callbacks leak.
    pub async fn unregister(&self, id: &str) {
        let handle = self.connections.write().await.remove(id);

        if let Some(handle) = handle {
            let mut subs = self.subscriptions.write().await;
            for topic in handle.subscriptions {
                if let Some(subscribers) = subs.get_mut(&topic) {
                    subscribers.remove(id);
                    if subscribers.is_empty() {
                        subs.remove(&topic);
                    }
                }
            }
        }

        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Subscribe a connection to topics, returning those accepted
    pub async fn subscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut connections = self.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.subscriptions.write().await;
        let mut subscribed = Vec::new();

        for topic in topics {
            if !is_valid_topic(&topic) {
                tracing::warn!(topic = %topic, "Invalid topic ignored");
                continue;
            }

            handle.subscriptions.insert(topic.clone());
            subs.entry(topic.clone())
                .or_insert_with(HashSet::new)
                .insert(id.to_string());

            subscribed.push(topic);
        }

        tracing::debug!(connection_id = %id, topics = ?subscribed, "Subscribed to topics");

        Ok(subscribed)
    }

    /// Unsubscribe a connection from topics, returning those removed
    pub async fn unsubscribe(
        &self,
        id: &str,
        topics: Vec<String>,
    ) -> Result<Vec<String>, HubError> {
        let mut connections = self.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.subscriptions.write().await;
        let mut unsubscribed = Vec::new();

        for topic in topics {
            if handle.subscriptions.remove(&topic) {
                unsubscribed.push(topic.clone());

                if let Some(subscribers) = subs.get_mut(&topic) {
                    subscribers.remove(id);
                    if subscribers.is_empty() {
                        subs.remove(&topic);
                    }
                }
            }
        }

        tracing::debug!(connection_id = %id, topics = ?unsubscribed, "Unsubscribed from topics");

        Ok(unsubscribed)
    }

    /// Broadcast an event to all subscribers of its topic
    pub async fn broadcast(&self, event: &WsEvent) {
        let subs = self.subscriptions.read().await;
        let connections = self.connections.read().await;

        let Some(subscriber_ids) = subs.get(&event.topic) else {
            return;
        };

        let mut sent_count = 0;
        for id in subscriber_ids {
            if let Some(handle) = connections.get(id) {
                if handle.sender.send(event.message.clone()).is_ok() {
                    sent_count += 1;
                }
            }
        }

        if sent_count > 0 {
            tracing::trace!(topic = %event.topic, subscribers = sent_count, "Broadcast snapshot");
        }
    }

    /// Publish an event from a synchronous-ish call site
    ///
    /// Spawns the broadcast so mutation paths never wait on slow sockets.
    pub fn publish(self: &Arc<Self>, event: WsEvent) {
        let hub = Arc::clone(self);
        tokio::spawn(async move {
            hub.broadcast(&event).await;
        });
    }

    /// Send a message directly to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let handle = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        handle.sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Get subscription count for a topic
    pub async fn subscription_count(&self, topic: &str) -> usize {
        self.subscriptions
            .read()
            .await
            .get(topic)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

/// The only topics the hub carries are the two collection snapshots.
fn is_valid_topic(topic: &str) -> bool {
    topic == TOPIC_LEADERBOARD || topic == TOPIC_LEAGUES
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_topics() {
        assert!(is_valid_topic("leaderboard"));
        assert!(is_valid_topic("leagues"));

        assert!(!is_valid_topic("members"));
        assert!(!is_valid_topic(""));
        assert!(!is_valid_topic("leaderboard.*"));
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.connection_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_subscribe_unsubscribe() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();

        let subscribed = hub
            .subscribe(&id, vec!["leaderboard".to_string(), "bogus".to_string()])
            .await
            .unwrap();
        assert_eq!(subscribed, vec!["leaderboard"]);
        assert_eq!(hub.subscription_count("leaderboard").await, 1);

        let unsubscribed = hub
            .unsubscribe(&id, vec!["leaderboard".to_string()])
            .await
            .unwrap();
        assert_eq!(unsubscribed, vec!["leaderboard"]);
        assert_eq!(hub.subscription_count("leaderboard").await, 0);

        hub.unregister(&id).await;
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let config = HubConfig { max_connections: 2 };
        let hub = ConnectionHub::new(config);

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();
        let result = hub.register(tx3).await;

        assert!(matches!(result, Err(HubError::TooManyConnections(2))));

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_subscribers() {
        let hub = ConnectionHub::new(HubConfig::default());

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();

        hub.subscribe(&id1, vec!["leaderboard".to_string()])
            .await
            .unwrap();

        let event = WsEvent::leaderboard(Vec::new());
        hub.broadcast(&event).await;

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        hub.subscribe(&id, vec!["leaderboard".to_string()])
            .await
            .unwrap();

        hub.publish(WsEvent::leaderboard(Vec::new()));

        match rx.recv().await {
            Some(ServerMessage::Leaderboard { members }) => assert!(members.is_empty()),
            other => panic!("expected leaderboard snapshot, got {:?}", other),
        }

        hub.unregister(&id).await;
    }

    #[tokio::test]
    async fn test_unregister_cleans_subscriptions() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        hub.subscribe(&id, vec!["leagues".to_string()]).await.unwrap();
        assert_eq!(hub.subscription_count("leagues").await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.subscription_count("leagues").await, 0);
    }
}
