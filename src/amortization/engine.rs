//! Month-by-month amortization loop

use super::payment::{monthly_payment, monthly_rate};
use super::schedule::{Schedule, ScheduleRow};
use super::state::AmortizationState;
use crate::error::ValidationError;
use crate::inputs::{validate_inputs, MortgageInputs};

/// Balance at or below this is treated as repaid
pub const BALANCE_EPSILON: f64 = 1e-8;

/// Months allowed past the nominal term before the loop is cut off
pub const HARD_STOP_EXTRA_MONTHS: u32 = 1200;

/// Months past the nominal term after which a stalled loan is abandoned
pub const STALL_CHECK_EXTRA_MONTHS: u32 = 600;

/// Scheduled principal below this counts as no progress
pub const STALL_PRINCIPAL_EPSILON: f64 = 1e-9;

/// Runs the amortization of one validated plan
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    inputs: MortgageInputs,
    monthly_rate: f64,
    standard_payment: f64,
}

impl AmortizationEngine {
    /// Validate the plan and precompute the monthly rate and level payment
    pub fn new(inputs: &MortgageInputs) -> Result<Self, ValidationError> {
        let inputs = validate_inputs(inputs)?;
        Ok(Self {
            monthly_rate: monthly_rate(inputs.annual_rate_percent),
            standard_payment: monthly_payment(
                inputs.loan_amount,
                inputs.annual_rate_percent,
                inputs.term_years,
            ),
            inputs,
        })
    }

    pub fn inputs(&self) -> &MortgageInputs {
        &self.inputs
    }

    /// Level payment over the full nominal term, before any overpayment
    pub fn standard_payment(&self) -> f64 {
        self.standard_payment
    }

    /// Simulate until the balance is repaid or a safety cap is reached
    pub fn run(&self) -> Schedule {
        let term_months = self.inputs.term_months();
        let hard_stop = term_months + HARD_STOP_EXTRA_MONTHS;
        let stall_check = term_months + STALL_CHECK_EXTRA_MONTHS;

        let mut schedule = Schedule::with_capacity(term_months as usize);
        let mut state = AmortizationState::from_inputs(&self.inputs);

        while state.balance > BALANCE_EPSILON && state.month < hard_stop {
            state.advance_month();

            let row = self.calculate_month(&mut state);
            schedule.add_row(row);

            if state.month > stall_check && state.last_principal.abs() < STALL_PRINCIPAL_EPSILON {
                log::warn!(
                    "Amortization stalled at month {} with balance {:.2}",
                    state.month,
                    state.balance
                );
                break;
            }
        }

        if state.month >= hard_stop && state.balance > BALANCE_EPSILON {
            log::warn!(
                "Amortization hit the {}-month cap with balance {:.2}",
                hard_stop,
                state.balance
            );
        }

        log::debug!(
            "Amortized {:.2} at {}% over {} months (final balance {:.2e})",
            self.inputs.loan_amount,
            self.inputs.annual_rate_percent,
            schedule.len(),
            schedule.final_balance()
        );

        schedule
    }

    /// Apply interest, the scheduled payment and any overpayment for one month
    fn calculate_month(&self, state: &mut AmortizationState) -> ScheduleRow {
        let starting_balance = state.balance;
        let interest = starting_balance * self.monthly_rate;

        // Principal never exceeds what is left, which settles the final partial month
        let principal = if self.monthly_rate == 0.0 {
            starting_balance.min(self.standard_payment)
        } else {
            starting_balance.min((self.standard_payment - interest).max(0.0))
        };
        let payment = principal + interest;
        let mut ending_balance = (starting_balance - principal).max(0.0);

        let mut overpayment = 0.0;
        if self.inputs.annual_overpayment > 0.0 && state.is_year_end() && ending_balance > 0.0 {
            overpayment = self.inputs.annual_overpayment.min(ending_balance);
            ending_balance -= overpayment;
        }

        state.record(interest, principal, overpayment, ending_balance);

        ScheduleRow {
            month: state.month,
            year: state.year,
            starting_balance,
            payment,
            interest,
            principal,
            overpayment,
            ending_balance,
            cumulative_interest: state.cumulative_interest,
            cumulative_principal: state.cumulative_principal,
            cumulative_overpayment: state.cumulative_overpayment,
        }
    }
}

/// Validate a plan and produce its full amortization schedule
pub fn amortize(inputs: &MortgageInputs) -> Result<Schedule, ValidationError> {
    Ok(AmortizationEngine::new(inputs)?.run())
}
