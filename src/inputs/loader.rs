//! Load a batch of mortgage plans from CSV
//!
//! Expected columns: `PropertyValue, LoanAmount, AnnualRate, TermYears,
//! FixedCosts, RecurringFee, Overpayment`. The last three may be left empty.

use csv::Reader;
use std::path::Path;

use super::{validate_inputs, MortgageInputs};
use crate::error::{PlannerError, PlannerResult};

/// Raw CSV row matching the plan file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyValue")]
    property_value: f64,
    #[serde(rename = "LoanAmount")]
    loan_amount: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate_percent: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "FixedCosts", default)]
    annual_fixed_costs: Option<f64>,
    #[serde(rename = "RecurringFee", default)]
    annual_recurring_fee: Option<f64>,
    #[serde(rename = "Overpayment", default)]
    annual_overpayment: Option<f64>,
}

impl CsvRow {
    fn to_inputs(self, row: usize) -> PlannerResult<MortgageInputs> {
        let inputs = MortgageInputs {
            property_value: self.property_value,
            loan_amount: self.loan_amount,
            annual_rate_percent: self.annual_rate_percent,
            term_years: self.term_years,
            annual_fixed_costs: self.annual_fixed_costs.unwrap_or(0.0),
            annual_recurring_fee: self.annual_recurring_fee.unwrap_or(0.0),
            annual_overpayment: self.annual_overpayment.unwrap_or(0.0),
        };
        validate_inputs(&inputs).map_err(|source| PlannerError::InvalidPlan { row, source })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<MortgageInputs>> {
    let reader = Reader::from_path(path)?;
    collect_plans(reader)
}

/// Load plans from any reader (e.g., string buffer, stdin)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> PlannerResult<Vec<MortgageInputs>> {
    collect_plans(Reader::from_reader(reader))
}

fn collect_plans<R: std::io::Read>(mut reader: Reader<R>) -> PlannerResult<Vec<MortgageInputs>> {
    let mut plans = Vec::new();

    // Data rows are numbered from 1, header excluded
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        plans.push(row.to_inputs(index + 1)?);
    }

    log::debug!("Loaded {} mortgage plans", plans.len());
    Ok(plans)
}
