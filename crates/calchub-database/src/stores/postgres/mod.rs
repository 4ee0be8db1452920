//! PostgreSQL store implementations.

pub mod audit;
pub mod calculator;
pub mod category;
pub mod version;

pub use audit::PgAuditStore;
pub use calculator::PgCalculatorStore;
pub use category::PgCategoryStore;
pub use version::PgVersionStore;
