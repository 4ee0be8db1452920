//! Assembled catalog tree structures.

pub mod tree;

pub use tree::{CalculatorSummary, CatalogNode};
