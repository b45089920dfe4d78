//! Mortgage input data structures, validation and plan loading

mod data;
mod validation;
pub mod loader;

pub use data::{default_inputs, serialize_inputs, MortgageInputs, ScenarioRange};
pub use validation::{validate_inputs, validate_scenario_range, MAX_ANNUAL_RATE, MAX_GRID_STEPS};
pub use loader::{load_plans, load_plans_from_reader};
