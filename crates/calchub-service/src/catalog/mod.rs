//! Catalog engine: tree assembly, category and calculator CRUD,
//! versioning and rollback.

pub mod service;
pub mod tree;
pub mod version;

pub use service::CatalogService;
pub use version::VersionService;
