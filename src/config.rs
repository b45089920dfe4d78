//! Planner configuration: plan inputs, scenario range and heatmap levels
//!
//! Loaded from a JSON file where every field is optional, then overridden by
//! `MORTGAGE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{PlannerResult, ValidationError};
use crate::inputs::{validate_inputs, validate_scenario_range, MortgageInputs, ScenarioRange};

/// Used when no overpayment level in the user's list parses
pub const FALLBACK_OVERPAYMENT_LEVELS: [f64; 3] = [0.0, 3_000.0, 6_000.0];

/// Starting heatmap levels
pub const DEFAULT_OVERPAYMENT_LEVELS: [f64; 5] = [0.0, 3_000.0, 6_000.0, 12_000.0, 18_000.0];

/// Display currency; calculations are currency-agnostic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "EUR ",
            Currency::Gbp => "GBP ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub inputs: MortgageInputs,
    pub scenario: ScenarioRange,
    pub overpayment_levels: Vec<f64>,
    pub currency: Currency,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            inputs: MortgageInputs::default(),
            scenario: ScenarioRange::default(),
            overpayment_levels: DEFAULT_OVERPAYMENT_LEVELS.to_vec(),
            currency: Currency::default(),
        }
    }
}

impl PlannerConfig {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded planner config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Override plan inputs from `MORTGAGE_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f64>().ok());
        let inputs = &mut self.inputs;

        if let Some(v) = parse("MORTGAGE_PROPERTY_VALUE") {
            inputs.property_value = v;
        }
        if let Some(v) = parse("MORTGAGE_LOAN_AMOUNT") {
            inputs.loan_amount = v;
        }
        if let Some(v) = parse("MORTGAGE_RATE") {
            inputs.annual_rate_percent = v;
        }
        if let Some(v) = lookup("MORTGAGE_TERM_YEARS").and_then(|s| s.trim().parse::<u32>().ok()) {
            inputs.term_years = v;
        }
        if let Some(v) = parse("MORTGAGE_FIXED_COSTS") {
            inputs.annual_fixed_costs = v;
        }
        if let Some(v) = parse("MORTGAGE_RECURRING_FEE") {
            inputs.annual_recurring_fee = v;
        }
        if let Some(v) = parse("MORTGAGE_OVERPAYMENT") {
            inputs.annual_overpayment = v;
        }
    }

    /// Validate inputs and range, normalizing the range
    pub fn validate(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            inputs: validate_inputs(&self.inputs)?,
            scenario: validate_scenario_range(&self.scenario)?,
            overpayment_levels: self.overpayment_levels.clone(),
            currency: self.currency,
        })
    }
}

/// Parse a comma-separated list of annual overpayments
///
/// Blank entries are skipped and unparseable ones dropped with a warning.
/// An empty result falls back to [`FALLBACK_OVERPAYMENT_LEVELS`].
pub fn parse_overpayment_levels(text: &str) -> Vec<f64> {
    let mut levels = Vec::new();

    for item in text.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match item.parse::<f64>() {
            Ok(value) => levels.push(value),
            Err(_) => log::warn!("Ignoring invalid overpayment value: {}", item),
        }
    }

    if levels.is_empty() {
        return FALLBACK_OVERPAYMENT_LEVELS.to_vec();
    }
    levels
}
