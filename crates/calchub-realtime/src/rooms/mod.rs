//! Game room state and coordination.

pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
pub use room::{GameRoom, Player};
