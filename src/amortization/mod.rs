//! Amortization simulator: payment formula, monthly loop and schedule output

mod payment;
mod state;
mod engine;
mod schedule;

pub use payment::{monthly_payment, monthly_rate};
pub use state::AmortizationState;
pub use engine::{
    amortize, AmortizationEngine, BALANCE_EPSILON, HARD_STOP_EXTRA_MONTHS, STALL_CHECK_EXTRA_MONTHS,
    STALL_PRINCIPAL_EPSILON,
};
pub use schedule::{annual_view, summarize, AnnualSummary, Schedule, ScheduleRow, ScheduleSummary};
