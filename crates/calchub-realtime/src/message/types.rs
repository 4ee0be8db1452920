//! Inbound and outbound WebSocket message type definitions.
//!
//! Event names are snake_case in the `type` field; payload fields are
//! camelCase on the wire (`roomCode`). Game action payloads are opaque
//! JSON relayed without inspection.

use serde::{Deserialize, Serialize};

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Open a new room.
    CreateRoom {
        /// Display name of the creating player.
        username: String,
    },
    /// Join (or reconnect to) an existing room.
    JoinRoom {
        /// Five-character room code.
        #[serde(rename = "roomCode")]
        room_code: String,
        /// Display name of the joining player.
        username: String,
    },
    /// Relay a game action to the opponent.
    GameAction {
        /// Room the action belongs to.
        #[serde(rename = "roomCode")]
        room_code: String,
        /// Action name, never interpreted by the server.
        action: String,
        /// Opaque action payload.
        #[serde(default)]
        payload: Option<serde_json::Value>,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Room opened; sent to the creator only.
    RoomCreated {
        /// The freshly generated room code.
        #[serde(rename = "roomCode")]
        room_code: String,
    },
    /// A player joined; broadcast to the whole room, joiner included.
    PlayerJoined {
        /// Human-readable join announcement.
        message: String,
        /// Current room roster.
        players: Vec<PlayerInfo>,
    },
    /// Opponent's relayed action; sent to everyone except the sender.
    OpponentAction {
        /// Action name as supplied by the sender.
        action: String,
        /// Opaque action payload.
        payload: Option<serde_json::Value>,
    },
    /// A player left; broadcast to the remaining room members.
    PlayerLeft {
        /// Human-readable leave announcement.
        message: String,
    },
    /// Room-level error; sent to the requester only.
    RoomError {
        /// Error description.
        message: String,
    },
    /// The catalog changed; clients should refetch the tree.
    CatalogUpdated,
    /// UI configuration changed; clients should refetch it.
    UiUpdated,
}

/// Player roster entry carried by `player_joined`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Player display name.
    pub username: String,
    /// Player score.
    pub score: u32,
}
