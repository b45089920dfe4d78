//! Error types for the planner
//!
//! Calculations fail only with [`ValidationError`]. File and CSV handling
//! wraps it in [`PlannerError`].

use thiserror::Error;

/// Rejected mortgage inputs or scenario range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be finite.")]
    NonFinite { field: &'static str },

    #[error("{field} cannot be negative.")]
    Negative { field: &'static str },

    #[error("Term must be between 1 and 50 years (got {0}).")]
    TermOutOfRange(u32),

    #[error("Annual rate appears unrealistic (>30%): {0}%")]
    UnrealisticRate(f64),

    #[error(
        "Loan amount is too high relative to property value ({loan_amount} > 1.5 x {property_value}). Check your numbers."
    )]
    LoanTooHigh {
        loan_amount: f64,
        property_value: f64,
    },

    #[error("Scenario step must be greater than zero.")]
    NonPositiveStep,

    #[error("Scenario rates above 30% are not allowed (got {0}%).")]
    ScenarioRateTooHigh(f64),

    #[error("Scenario grid is too large ({steps:.0} steps); reduce the range or increase step size.")]
    GridTooLarge { steps: f64 },
}

/// Errors from loading configs/plans and writing exports
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Input validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid plan on row {row}: {source}")]
    InvalidPlan {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
