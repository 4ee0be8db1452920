//! # calchub-database
//!
//! Persistence layer for CalcHub: per-entity store traits, a PostgreSQL
//! implementation, an in-memory fallback with equivalent semantics, and
//! the provider that selects between them at process startup.

pub mod connection;
pub mod migration;
pub mod provider;
pub mod stores;

pub use connection::DatabasePool;
pub use provider::StoreManager;
