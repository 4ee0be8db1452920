//! # calchub-api
//!
//! HTTP API layer for CalcHub built on Axum.
//!
//! Provides the catalog REST endpoints, the WebSocket upgrade for game
//! rooms and change broadcasts, the actor-context extractor, and error
//! mapping.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
