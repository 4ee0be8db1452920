//! A single two-player game room.

use tokio::task::JoinHandle;

use crate::connection::ConnectionId;
use crate::message::PlayerInfo;

/// Maximum players per room.
pub const MAX_PLAYERS: usize = 2;

/// A player seated in a room.
#[derive(Debug, Clone)]
pub struct Player {
    /// The connection the player is currently speaking through.
    /// Updated in place on reconnect.
    pub connection_id: ConnectionId,
    /// Display name; doubles as the reconnect key.
    pub username: String,
    /// Player score.
    pub score: u32,
}

/// In-memory state of one game room. Rooms are never persisted.
#[derive(Debug)]
pub struct GameRoom {
    /// Five-character room code, `[A-Z0-9]`.
    pub code: String,
    /// Seated players, in join order. Join order is stable across
    /// reconnects.
    pub players: Vec<Player>,
    /// Opaque shared game state, reserved for clients.
    pub game_data: serde_json::Value,
    /// Pending drain timer, set while the room sits empty.
    pub delete_timer: Option<JoinHandle<()>>,
}

impl GameRoom {
    /// Creates a new empty room with the given code.
    pub fn new(code: String) -> Self {
        Self {
            code,
            players: Vec::new(),
            game_data: serde_json::json!({}),
            delete_timer: None,
        }
    }

    /// Whether the room holds the maximum number of players.
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Find a seated player by username.
    pub fn player_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.username == username)
    }

    /// Cancel a pending drain timer, if any.
    pub fn cancel_drain(&mut self) {
        if let Some(timer) = self.delete_timer.take() {
            timer.abort();
        }
    }

    /// Current roster as wire payload entries.
    pub fn roster(&self) -> Vec<PlayerInfo> {
        self.players
            .iter()
            .map(|p| PlayerInfo {
                username: p.username.clone(),
                score: p.score,
            })
            .collect()
    }
}
