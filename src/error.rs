//! Error types for deal validation and loading

use thiserror::Error;

/// A deal configuration that cannot be projected.
///
/// Raised before the first month is simulated, so a projection is either
/// complete or not produced at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("projection length must be between 1 and {max} months, got {months}")]
    ProjectionLength { months: u32, max: u32 },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    PercentOutOfRange { field: &'static str, value: f64 },

    #[error("purchase loan of {amount} requires both a rate and a term")]
    IncompleteLoan { amount: f64 },

    #[error("invalid purchase loan terms: {0}")]
    InvalidLoanTerms(String),

    #[error("{kind} event month must be at least 1")]
    EventMonth { kind: &'static str },

    #[error("refinance in month {month}: {reason}")]
    InvalidRefinance { month: u32, reason: String },
}

/// Failure to turn a stored deal file into a usable configuration
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read deal file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse deal file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid deal: {0}")]
    Invalid(#[from] ValidationError),
}
