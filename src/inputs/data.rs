//! Mortgage plan parameters and the scenario rate range

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::validate_inputs;
use crate::error::ValidationError;

/// Parameters of a single mortgage plan
///
/// Monetary fields share one (unspecified) currency. Rates are percent per
/// year, so 5.0 means 5%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageInputs {
    /// Purchase price / current value of the property
    pub property_value: f64,

    /// Amount borrowed
    pub loan_amount: f64,

    /// Fixed annual interest rate in percent
    pub annual_rate_percent: f64,

    /// Loan term in whole years
    pub term_years: u32,

    /// Fixed annual cost of running the house (insurance, service charge, ...)
    pub annual_fixed_costs: f64,

    /// Any other recurring annual fee tied to the property
    pub annual_recurring_fee: f64,

    /// Lump sum paid off the balance every 12th month
    pub annual_overpayment: f64,
}

impl MortgageInputs {
    /// Cash put down: property value not covered by the loan
    pub fn deposit(&self) -> f64 {
        (self.property_value - self.loan_amount).max(0.0)
    }

    /// Loan-to-value in percent (0 when there is no property value)
    pub fn ltv_percent(&self) -> f64 {
        if self.property_value <= 0.0 {
            return 0.0;
        }
        self.loan_amount / self.property_value * 100.0
    }

    /// Non-loan housing costs per year
    pub fn annual_costs(&self) -> f64 {
        self.annual_fixed_costs + self.annual_recurring_fee
    }

    /// Same principal, term and costs with a different rate and overpayment
    pub fn with_scenario(&self, annual_rate_percent: f64, annual_overpayment: f64) -> Self {
        Self {
            annual_rate_percent,
            annual_overpayment,
            ..*self
        }
    }

    /// Copy with the annual overpayment removed
    pub fn without_overpayment(&self) -> Self {
        Self {
            annual_overpayment: 0.0,
            ..*self
        }
    }

    pub fn term_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }
}

impl Default for MortgageInputs {
    fn default() -> Self {
        default_inputs()
    }
}

/// Generic starter values, not tied to anyone's circumstances
pub fn default_inputs() -> MortgageInputs {
    MortgageInputs {
        property_value: 300_000.0,
        loan_amount: 240_000.0,
        annual_rate_percent: 5.0,
        term_years: 30,
        annual_fixed_costs: 1_200.0,
        annual_recurring_fee: 0.0,
        annual_overpayment: 6_000.0,
    }
}

/// Range of annual rates (percent) swept by the scenario analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRange {
    pub low_rate: f64,
    pub high_rate: f64,
    pub step: f64,
}

impl ScenarioRange {
    pub fn new(low_rate: f64, high_rate: f64, step: f64) -> Self {
        Self {
            low_rate,
            high_rate,
            step,
        }
    }
}

impl Default for ScenarioRange {
    fn default() -> Self {
        Self::new(3.0, 7.0, 0.25)
    }
}

/// Flatten validated inputs into a key/value map, including the derived
/// deposit and loan-to-value figures
pub fn serialize_inputs(inputs: &MortgageInputs) -> Result<Map<String, Value>, ValidationError> {
    let checked = validate_inputs(inputs)?;

    let mut data = Map::new();
    data.insert("property_value".into(), Value::from(checked.property_value));
    data.insert("loan_amount".into(), Value::from(checked.loan_amount));
    data.insert("annual_rate_percent".into(), Value::from(checked.annual_rate_percent));
    data.insert("term_years".into(), Value::from(checked.term_years));
    data.insert("annual_fixed_costs".into(), Value::from(checked.annual_fixed_costs));
    data.insert("annual_recurring_fee".into(), Value::from(checked.annual_recurring_fee));
    data.insert("annual_overpayment".into(), Value::from(checked.annual_overpayment));
    data.insert("deposit".into(), Value::from(checked.deposit()));
    data.insert("ltv_percent".into(), Value::from(checked.ltv_percent()));
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_inputs_are_generic() {
        let defaults = default_inputs();
        assert_eq!(defaults.property_value, 300_000.0);
        assert_eq!(defaults.loan_amount, 240_000.0);
        assert_eq!(defaults.annual_rate_percent, 5.0);
        assert_eq!(defaults.term_years, 30);
    }

    #[test]
    fn test_deposit_and_ltv() {
        let inputs = default_inputs();
        assert_eq!(inputs.deposit(), 60_000.0);
        assert_relative_eq!(inputs.ltv_percent(), 80.0);

        let over = MortgageInputs {
            loan_amount: 330_000.0,
            ..inputs
        };
        assert_eq!(over.deposit(), 0.0);

        let no_property = MortgageInputs {
            property_value: 0.0,
            ..inputs
        };
        assert_eq!(no_property.ltv_percent(), 0.0);
    }

    #[test]
    fn test_with_scenario_keeps_principal_and_term() {
        let base = default_inputs();
        let variant = base.with_scenario(3.5, 0.0);

        assert_eq!(variant.annual_rate_percent, 3.5);
        assert_eq!(variant.annual_overpayment, 0.0);
        assert_eq!(variant.loan_amount, base.loan_amount);
        assert_eq!(variant.term_years, base.term_years);
        assert_eq!(variant.annual_fixed_costs, base.annual_fixed_costs);
    }

    #[test]
    fn test_serialize_includes_derived_fields() {
        let data = serialize_inputs(&default_inputs()).unwrap();

        assert_eq!(data["deposit"].as_f64(), Some(60_000.0));
        assert_eq!(data["ltv_percent"].as_f64(), Some(80.0));
        assert_eq!(data["term_years"].as_u64(), Some(30));
        assert_eq!(data.len(), 9);
    }

    #[test]
    fn test_serialize_rejects_invalid_inputs() {
        let inputs = MortgageInputs {
            annual_rate_percent: 35.0,
            ..default_inputs()
        };
        assert!(serialize_inputs(&inputs).is_err());
    }

    #[test]
    fn test_missing_json_fields_use_defaults() {
        let inputs: MortgageInputs = serde_json::from_str(r#"{"loan_amount": 100000}"#).unwrap();
        assert_eq!(inputs.loan_amount, 100_000.0);
        assert_eq!(inputs.property_value, 300_000.0);
    }
}
