//! Room registry implementing the room lifecycle.
//!
//! Rooms live in a `DashMap`; each room is mutated under its own entry
//! lock and outbound messages are sent only after the lock is released.
//! The registry is plain owned state injected into the engine, never a
//! process-wide global.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use rand::Rng;
use tracing::{debug, info};

use crate::connection::{ConnectionId, ConnectionPool};
use crate::message::OutboundMessage;
use crate::rooms::room::GameRoom;

/// How long an empty room survives before deletion. A fixed platform
/// constant, not a tunable.
pub const DRAIN_GRACE: Duration = Duration::from_secs(15);

const CODE_LENGTH: usize = 5;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Registry of all live game rooms.
#[derive(Debug)]
pub struct RoomRegistry {
    /// Room code → room state.
    rooms: Arc<DashMap<String, GameRoom>>,
    /// Connection pool for outbound delivery.
    pool: Arc<ConnectionPool>,
}

impl RoomRegistry {
    /// Creates a new empty registry delivering through the given pool.
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            pool,
        }
    }

    /// Open a new room for the given connection.
    ///
    /// A blank username is ignored without a reply. A code collision
    /// overwrites the prior room; with 36^5 codes this is accepted.
    pub fn create_room(&self, conn_id: ConnectionId, username: &str) {
        let username = username.trim();
        if username.is_empty() {
            debug!(connection_id = %conn_id, "Ignoring create_room with blank username");
            return;
        }

        let code = generate_code();
        let mut room = GameRoom::new(code.clone());
        room.players.push(crate::rooms::room::Player {
            connection_id: conn_id,
            username: username.to_string(),
            score: 0,
        });
        self.rooms.insert(code.clone(), room);

        info!(room_code = %code, username, "Room created");
        self.send(conn_id, OutboundMessage::RoomCreated { room_code: code });
    }

    /// Join or reconnect to a room.
    pub fn join_room(&self, conn_id: ConnectionId, room_code: &str, username: &str) {
        let mut outbound: Vec<(ConnectionId, OutboundMessage)> = Vec::new();

        match self.rooms.get_mut(room_code) {
            None => {
                outbound.push((
                    conn_id,
                    OutboundMessage::RoomError {
                        message: "Invalid Room Code!".to_string(),
                    },
                ));
            }
            Some(mut room) => {
                if let Some(player) = room.player_mut(username) {
                    // Reconnect: same seat, new connection.
                    player.connection_id = conn_id;
                    room.cancel_drain();
                    debug!(room_code, username, "Player reconnected");
                } else if room.is_full() {
                    outbound.push((
                        conn_id,
                        OutboundMessage::RoomError {
                            message: "Room is full! Only 2 players allowed.".to_string(),
                        },
                    ));
                    drop(room);
                    self.deliver(outbound);
                    return;
                } else {
                    room.players.push(crate::rooms::room::Player {
                        connection_id: conn_id,
                        username: username.to_string(),
                        score: 0,
                    });
                    info!(room_code, username, "Player joined");
                }

                let announcement = OutboundMessage::PlayerJoined {
                    message: format!("{username} joined the game!"),
                    players: room.roster(),
                };
                for player in &room.players {
                    outbound.push((player.connection_id, announcement.clone()));
                }
            }
        }

        self.deliver(outbound);
    }

    /// Relay a game action to every other connection in the room.
    ///
    /// Unknown rooms are a silent no-op; the action itself is never
    /// interpreted.
    pub fn relay_action(
        &self,
        conn_id: ConnectionId,
        room_code: &str,
        action: String,
        payload: Option<serde_json::Value>,
    ) {
        let mut outbound: Vec<(ConnectionId, OutboundMessage)> = Vec::new();

        if let Some(room) = self.rooms.get(room_code) {
            let relayed = OutboundMessage::OpponentAction { action, payload };
            for player in &room.players {
                if player.connection_id != conn_id {
                    outbound.push((player.connection_id, relayed.clone()));
                }
            }
        }

        self.deliver(outbound);
    }

    /// Remove a dropped connection from the room it was seated in.
    ///
    /// The last player leaving starts the drain timer instead of
    /// deleting immediately, so a quick reconnect keeps the room.
    pub fn disconnect(&self, conn_id: ConnectionId) {
        let mut outbound: Vec<(ConnectionId, OutboundMessage)> = Vec::new();

        for mut entry in self.rooms.iter_mut() {
            let Some(idx) = entry.players.iter().position(|p| p.connection_id == conn_id) else {
                continue;
            };
            let player = entry.players.remove(idx);

            if entry.players.is_empty() {
                entry.cancel_drain();
                entry.delete_timer = Some(self.spawn_drain(entry.code.clone()));
                info!(room_code = %entry.code, "Room empty, drain timer started");
            } else {
                let announcement = OutboundMessage::PlayerLeft {
                    message: format!("{} left the game.", player.username),
                };
                for remaining in &entry.players {
                    outbound.push((remaining.connection_id, announcement.clone()));
                }
                info!(room_code = %entry.code, username = %player.username, "Player left");
            }
            break;
        }

        self.deliver(outbound);
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Whether a room with the given code exists.
    pub fn contains(&self, room_code: &str) -> bool {
        self.rooms.contains_key(room_code)
    }

    fn spawn_drain(&self, code: String) -> tokio::task::JoinHandle<()> {
        let rooms = Arc::clone(&self.rooms);
        tokio::spawn(async move {
            tokio::time::sleep(DRAIN_GRACE).await;
            // A rejoin may have raced the timer; only delete if the
            // room is still empty.
            let removed = rooms.remove_if(&code, |_, room| room.players.is_empty());
            if removed.is_some() {
                info!(room_code = %code, "Empty room deleted");
            }
        })
    }

    fn deliver(&self, outbound: Vec<(ConnectionId, OutboundMessage)>) {
        for (conn_id, msg) in outbound {
            if let Some(handle) = self.pool.get(&conn_id) {
                handle.send(msg);
            }
        }
    }

    fn send(&self, conn_id: ConnectionId, msg: OutboundMessage) {
        if let Some(handle) = self.pool.get(&conn_id) {
            handle.send(msg);
        }
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
