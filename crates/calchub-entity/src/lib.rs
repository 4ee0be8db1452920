//! # calchub-entity
//!
//! Domain entity models for CalcHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod audit;
pub mod calculator;
pub mod catalog;
pub mod category;
pub mod serde_util;
