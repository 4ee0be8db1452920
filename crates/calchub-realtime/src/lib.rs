//! # calchub-realtime
//!
//! WebSocket engine for CalcHub: anonymous game-room coordination plus
//! catalog change broadcasts. Transport-agnostic — the API crate owns
//! the actual WebSocket upgrade and pumps messages in and out through
//! [`RealtimeEngine`].

pub mod connection;
pub mod message;
pub mod rooms;
pub mod server;

pub use connection::{ConnectionHandle, ConnectionId, ConnectionPool};
pub use message::{InboundMessage, OutboundMessage};
pub use rooms::RoomRegistry;
pub use server::RealtimeEngine;
