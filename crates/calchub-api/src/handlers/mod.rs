//! HTTP and WebSocket request handlers.

pub mod audit;
pub mod catalog;
pub mod health;
pub mod ws;
