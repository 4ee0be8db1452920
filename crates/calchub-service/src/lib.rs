//! # calchub-service
//!
//! Business logic service layer for CalcHub. Each service orchestrates
//! entity stores and the audit recorder to implement application-level
//! use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod catalog;
pub mod context;

pub use audit::AuditRecorder;
pub use catalog::{CatalogService, VersionService};
pub use context::ActorContext;
