//! Calculator domain entities.

pub mod model;
pub mod version;

pub use model::{Calculator, CalculatorPlacement, CreateCalculator, UpdateCalculator};
pub use version::{CalculatorVersion, CreateVersion};
