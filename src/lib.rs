//! BRRRR Projection - month-by-month projection engine for leveraged rental deals
//!
//! This library provides:
//! - Deal inputs (acquisition, operation, scheduled events) with serde round-tripping
//! - Loan amortization, cash-out refinance and capital reserve calculators
//! - A deterministic monthly projection with summary metrics and IRR
//! - A scenario runner for comparing deals and deal variants

pub mod deal;
pub mod error;
pub mod finance;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use deal::{Acquisition, HoldingCosts, Operation};
pub use error::{LoadError, ValidationError};
pub use projection::{generate_projection, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
