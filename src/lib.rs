//! Mortgage Planner - amortization and scenario engine for fixed-rate mortgages
//!
//! This library provides:
//! - Input validation for mortgage plans and scenario rate ranges
//! - Level monthly payment and month-by-month amortization with annual overpayments
//! - Whole-loan and per-year summaries
//! - Rate sweeps, rate x overpayment heatmaps and two-plan comparison
//! - CSV export and JSON configuration for the command-line front end

pub mod error;
pub mod inputs;
pub mod amortization;
pub mod scenario;
pub mod report;
pub mod export;
pub mod config;
pub mod format;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult, ValidationError};
pub use inputs::{
    default_inputs, serialize_inputs, validate_inputs, validate_scenario_range, MortgageInputs,
    ScenarioRange,
};
pub use amortization::{
    amortize, annual_view, monthly_payment, summarize, AnnualSummary, Schedule, ScheduleRow,
    ScheduleSummary,
};
pub use scenario::{
    build_heatmap_data, compare_plans, rate_grid, scenario_analysis, scenario_result, HeatmapCell,
    HeatmapGrid, PlanChoice, PlanComparison, ScenarioRow, ScenarioRunner,
};
pub use report::{CostBreakdown, PlanOverview};
pub use config::{Currency, PlannerConfig};
