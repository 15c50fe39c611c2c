//! Projection engine for month-by-month deal projections

mod engine;
mod irr;
mod snapshot;
mod state;
mod validation;

pub use engine::{generate_projection, ProjectionConfig, ProjectionEngine};
pub use irr::{annualize, calculate_irr, npv, IrrFailure, IrrOutcome};
pub use snapshot::{irr_cashflows, CashOnCash, MonthlySnapshot, ProjectionResult, ProjectionSummary};
pub use state::ProjectionState;
pub use validation::{validate, MAX_PROJECTION_MONTHS};
