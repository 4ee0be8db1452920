//! In-memory store implementations.
//!
//! Semantics match the PostgreSQL stores row for row; used in
//! environments without a live database and throughout the test suite.

pub mod audit;
pub mod calculator;
pub mod category;
pub mod version;

pub use audit::MemoryAuditStore;
pub use calculator::MemoryCalculatorStore;
pub use category::MemoryCategoryStore;
pub use version::MemoryVersionStore;
