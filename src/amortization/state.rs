//! Running state of a loan during simulation

use crate::inputs::MortgageInputs;

/// Balance and running totals carried from one month to the next
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current month (1-indexed once the first month has started)
    pub month: u32,

    /// Loan year of the current month, ceil(month / 12)
    pub year: u32,

    /// Outstanding balance at the start of the current month
    pub balance: f64,

    pub cumulative_interest: f64,
    pub cumulative_principal: f64,
    pub cumulative_overpayment: f64,

    /// Scheduled principal repaid in the most recent month
    pub last_principal: f64,
}

impl AmortizationState {
    /// Initialize state at drawdown, before the first payment
    pub fn from_inputs(inputs: &MortgageInputs) -> Self {
        Self {
            month: 0,
            year: 0,
            balance: inputs.loan_amount,
            cumulative_interest: 0.0,
            cumulative_principal: 0.0,
            cumulative_overpayment: 0.0,
            last_principal: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        self.year = self.month.div_ceil(12);
    }

    /// Whether the current month ends a loan year
    pub fn is_year_end(&self) -> bool {
        self.month > 0 && self.month % 12 == 0
    }

    /// Record one month's flows and roll the balance forward
    pub fn record(&mut self, interest: f64, principal: f64, overpayment: f64, ending_balance: f64) {
        self.cumulative_interest += interest;
        self.cumulative_principal += principal;
        self.cumulative_overpayment += overpayment;
        self.last_principal = principal;
        self.balance = ending_balance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::default_inputs;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_year_tracks_month() {
        let mut state = AmortizationState::from_inputs(&default_inputs());
        assert_eq!(state.balance, 240_000.0);

        let mut years = Vec::new();
        for _ in 0..25 {
            state.advance_month();
            years.push(state.year);
        }
        assert_eq!(years[0], 1);
        assert_eq!(years[11], 1);
        assert_eq!(years[12], 2);
        assert_eq!(years[24], 3);
    }

    #[test]
    fn test_year_end_detection() {
        let mut state = AmortizationState::from_inputs(&default_inputs());
        assert!(!state.is_year_end());

        for _ in 0..11 {
            state.advance_month();
            assert!(!state.is_year_end());
        }
        state.advance_month();
        assert!(state.is_year_end());
    }

    #[test]
    fn test_record_accumulates() {
        let mut state = AmortizationState::from_inputs(&default_inputs());
        state.record(1_000.0, 288.0, 0.0, 239_712.0);
        state.record(998.8, 289.2, 6_000.0, 233_422.8);

        assert_abs_diff_eq!(state.cumulative_interest, 1_998.8, epsilon = 1e-9);
        assert_abs_diff_eq!(state.cumulative_principal, 577.2, epsilon = 1e-9);
        assert_eq!(state.cumulative_overpayment, 6_000.0);
        assert_eq!(state.last_principal, 289.2);
        assert_eq!(state.balance, 233_422.8);
    }
}
