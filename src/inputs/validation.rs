//! Input and scenario-range validation
//!
//! Runs once at the entry of every calculation. Nothing is clamped: a bad
//! field is reported back to the caller.

use super::data::{MortgageInputs, ScenarioRange};
use crate::error::ValidationError;

/// Highest annual rate (percent) accepted anywhere
pub const MAX_ANNUAL_RATE: f64 = 30.0;

/// Largest (high - low) / step accepted for a scenario grid
pub const MAX_GRID_STEPS: f64 = 300.0;

const MIN_TERM_YEARS: u32 = 1;
const MAX_TERM_YEARS: u32 = 50;

/// Loan may be at most this multiple of the property value
const MAX_LOAN_TO_VALUE: f64 = 1.5;

fn ensure_finite_non_negative(value: f64, field: &'static str) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Check a plan and return a validated copy
pub fn validate_inputs(inputs: &MortgageInputs) -> Result<MortgageInputs, ValidationError> {
    let property_value = ensure_finite_non_negative(inputs.property_value, "Property value")?;
    let loan_amount = ensure_finite_non_negative(inputs.loan_amount, "Loan amount")?;
    let annual_rate_percent = ensure_finite_non_negative(inputs.annual_rate_percent, "Annual rate")?;
    let annual_fixed_costs =
        ensure_finite_non_negative(inputs.annual_fixed_costs, "Annual fixed costs")?;
    let annual_recurring_fee =
        ensure_finite_non_negative(inputs.annual_recurring_fee, "Annual recurring property fee")?;
    let annual_overpayment =
        ensure_finite_non_negative(inputs.annual_overpayment, "Annual overpayment")?;

    if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&inputs.term_years) {
        return Err(ValidationError::TermOutOfRange(inputs.term_years));
    }
    if annual_rate_percent > MAX_ANNUAL_RATE {
        return Err(ValidationError::UnrealisticRate(annual_rate_percent));
    }
    if property_value > 0.0 && loan_amount > property_value * MAX_LOAN_TO_VALUE {
        return Err(ValidationError::LoanTooHigh {
            loan_amount,
            property_value,
        });
    }

    Ok(MortgageInputs {
        property_value,
        loan_amount,
        annual_rate_percent,
        term_years: inputs.term_years,
        annual_fixed_costs,
        annual_recurring_fee,
        annual_overpayment,
    })
}

/// Check a scenario range and normalize it so that low <= high
pub fn validate_scenario_range(scenario: &ScenarioRange) -> Result<ScenarioRange, ValidationError> {
    let low_rate = ensure_finite_non_negative(scenario.low_rate, "Minimum scenario rate")?;
    let high_rate = ensure_finite_non_negative(scenario.high_rate, "Maximum scenario rate")?;
    let step = ensure_finite_non_negative(scenario.step, "Scenario step")?;

    if step <= 0.0 {
        return Err(ValidationError::NonPositiveStep);
    }

    let (low, high) = (low_rate.min(high_rate), low_rate.max(high_rate));

    if high > MAX_ANNUAL_RATE {
        return Err(ValidationError::ScenarioRateTooHigh(high));
    }
    let steps = (high - low) / step;
    if steps > MAX_GRID_STEPS {
        return Err(ValidationError::GridTooLarge { steps });
    }

    Ok(ScenarioRange::new(low, high, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::default_inputs;

    #[test]
    fn test_validate_inputs_accepts_defaults() {
        let inputs = default_inputs();
        assert_eq!(validate_inputs(&inputs), Ok(inputs));
    }

    #[test]
    fn test_validate_inputs_rejects_unrealistic_rate() {
        let inputs = MortgageInputs {
            annual_rate_percent: 35.0,
            annual_overpayment: 0.0,
            ..default_inputs()
        };
        let err = validate_inputs(&inputs).unwrap_err();
        assert_eq!(err, ValidationError::UnrealisticRate(35.0));
        assert!(err.to_string().contains("unrealistic"));
    }

    #[test]
    fn test_validate_inputs_rejects_loan_above_cap() {
        let inputs = MortgageInputs {
            property_value: 100_000.0,
            loan_amount: 200_000.0,
            ..default_inputs()
        };
        let err = validate_inputs(&inputs).unwrap_err();
        assert!(matches!(err, ValidationError::LoanTooHigh { .. }));
    }

    #[test]
    fn test_loan_cap_ignored_without_property_value() {
        let inputs = MortgageInputs {
            property_value: 0.0,
            loan_amount: 200_000.0,
            ..default_inputs()
        };
        assert!(validate_inputs(&inputs).is_ok());
    }

    #[test]
    fn test_validate_inputs_rejects_bad_fields() {
        let nan = MortgageInputs {
            loan_amount: f64::NAN,
            ..default_inputs()
        };
        assert_eq!(
            validate_inputs(&nan),
            Err(ValidationError::NonFinite { field: "Loan amount" })
        );

        let negative = MortgageInputs {
            annual_overpayment: -1.0,
            ..default_inputs()
        };
        assert_eq!(
            validate_inputs(&negative),
            Err(ValidationError::Negative { field: "Annual overpayment" })
        );

        for term_years in [0, 51] {
            let bad_term = MortgageInputs {
                term_years,
                ..default_inputs()
            };
            assert_eq!(
                validate_inputs(&bad_term),
                Err(ValidationError::TermOutOfRange(term_years))
            );
        }
    }

    #[test]
    fn test_validate_scenario_range_normalizes_low_high() {
        let scenario = validate_scenario_range(&ScenarioRange::new(7.0, 3.0, 0.5)).unwrap();
        assert_eq!(scenario.low_rate, 3.0);
        assert_eq!(scenario.high_rate, 7.0);
        assert_eq!(scenario.step, 0.5);
    }

    #[test]
    fn test_validate_scenario_range_rejects_bad_ranges() {
        assert_eq!(
            validate_scenario_range(&ScenarioRange::new(3.0, 4.0, 0.0)),
            Err(ValidationError::NonPositiveStep)
        );
        assert_eq!(
            validate_scenario_range(&ScenarioRange::new(3.0, 31.0, 0.5)),
            Err(ValidationError::ScenarioRateTooHigh(31.0))
        );
        assert!(matches!(
            validate_scenario_range(&ScenarioRange::new(0.0, 30.0, 0.05)),
            Err(ValidationError::GridTooLarge { .. })
        ));
        // Exactly 300 steps is still allowed
        assert!(validate_scenario_range(&ScenarioRange::new(0.0, 18.75, 0.0625)).is_ok());
    }
}
