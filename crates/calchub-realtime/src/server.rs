//! The realtime engine: connection registration, inbound dispatch, and
//! change broadcasts.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use calchub_core::config::realtime::RealtimeConfig;

use crate::connection::{ConnectionHandle, ConnectionId, ConnectionPool};
use crate::message::{InboundMessage, OutboundMessage};
use crate::rooms::RoomRegistry;

/// Transport-agnostic WebSocket engine.
///
/// The API layer owns the socket upgrade; it registers each accepted
/// connection here, forwards every parsed inbound message through
/// [`handle_inbound`](Self::handle_inbound), and unregisters on close.
#[derive(Debug)]
pub struct RealtimeEngine {
    /// All active connections.
    pool: Arc<ConnectionPool>,
    /// Live game rooms.
    rooms: RoomRegistry,
    /// Per-connection outbound buffer size.
    channel_buffer_size: usize,
}

impl RealtimeEngine {
    /// Creates a new engine from configuration.
    pub fn new(config: &RealtimeConfig) -> Self {
        let pool = Arc::new(ConnectionPool::new());
        Self {
            rooms: RoomRegistry::new(pool.clone()),
            pool,
            channel_buffer_size: config.channel_buffer_size,
        }
    }

    /// Register a new connection. Returns the handle plus the receiver
    /// end the transport pumps out to the socket.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));
        self.pool.add(handle.clone());
        info!(connection_id = %handle.id, total = self.pool.connection_count(), "Connection registered");
        (handle, rx)
    }

    /// Unregister a closed connection and seat it out of its room.
    pub fn unregister(&self, conn_id: ConnectionId) {
        if let Some(handle) = self.pool.remove(&conn_id) {
            handle.mark_dead();
        }
        self.rooms.disconnect(conn_id);
        info!(connection_id = %conn_id, total = self.pool.connection_count(), "Connection unregistered");
    }

    /// Dispatch one parsed inbound message.
    pub fn handle_inbound(&self, conn_id: ConnectionId, msg: InboundMessage) {
        debug!(connection_id = %conn_id, message = ?msg, "Inbound message");
        match msg {
            InboundMessage::CreateRoom { username } => {
                self.rooms.create_room(conn_id, &username);
            }
            InboundMessage::JoinRoom { room_code, username } => {
                self.rooms.join_room(conn_id, &room_code, &username);
            }
            InboundMessage::GameAction {
                room_code,
                action,
                payload,
            } => {
                self.rooms.relay_action(conn_id, &room_code, action, payload);
            }
        }
    }

    /// Tell every connected client the catalog changed.
    pub fn broadcast_catalog_updated(&self) {
        self.broadcast(OutboundMessage::CatalogUpdated);
    }

    /// Tell every connected client the UI configuration changed.
    pub fn broadcast_ui_updated(&self) {
        self.broadcast(OutboundMessage::UiUpdated);
    }

    /// Live room count, exposed for health reporting.
    pub fn room_count(&self) -> usize {
        self.rooms.room_count()
    }

    /// Active connection count, exposed for health reporting.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    fn broadcast(&self, msg: OutboundMessage) {
        for handle in self.pool.all_connections() {
            handle.send(msg.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_updated_reaches_every_connection() {
        let engine = RealtimeEngine::new(&RealtimeConfig::default());
        let (_a, mut a_rx) = engine.register();
        let (_b, mut b_rx) = engine.register();

        engine.broadcast_catalog_updated();

        for rx in [&mut a_rx, &mut b_rx] {
            assert!(matches!(
                rx.try_recv().unwrap(),
                OutboundMessage::CatalogUpdated
            ));
        }
    }

    #[tokio::test]
    async fn test_unregister_removes_player_from_room() {
        let engine = RealtimeEngine::new(&RealtimeConfig::default());
        let (alice, mut alice_rx) = engine.register();
        let (bob, mut bob_rx) = engine.register();

        engine.handle_inbound(
            alice.id,
            InboundMessage::CreateRoom {
                username: "alice".to_string(),
            },
        );
        let code = match alice_rx.try_recv().unwrap() {
            OutboundMessage::RoomCreated { room_code } => room_code,
            other => panic!("unexpected message: {other:?}"),
        };
        engine.handle_inbound(
            bob.id,
            InboundMessage::JoinRoom {
                room_code: code,
                username: "bob".to_string(),
            },
        );
        bob_rx.try_recv().unwrap();

        engine.unregister(alice.id);

        assert!(matches!(
            bob_rx.try_recv().unwrap(),
            OutboundMessage::PlayerLeft { .. }
        ));
        assert_eq!(engine.connection_count(), 1);
    }
}
