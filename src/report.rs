//! Dashboard figures for a single plan
//!
//! Everything here is derived from the schedule; formatting is left to the
//! caller.

use serde::Serialize;

use crate::amortization::{amortize, monthly_payment, AnnualSummary, Schedule, ScheduleSummary};
use crate::error::ValidationError;
use crate::inputs::{validate_inputs, MortgageInputs};

/// Where the money goes over the life of the loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub principal: f64,
    pub interest: f64,
    pub overpayment: f64,
    pub fixed_costs: f64,
    pub recurring_fee: f64,
}

impl CostBreakdown {
    pub fn from_schedule(schedule: &Schedule, inputs: &MortgageInputs) -> Self {
        let years = schedule.last().map(|r| r.month as f64 / 12.0).unwrap_or(0.0);

        Self {
            principal: schedule.total_principal(),
            interest: schedule.total_interest(),
            overpayment: schedule.total_overpayment(),
            fixed_costs: inputs.annual_fixed_costs * years,
            recurring_fee: inputs.annual_recurring_fee * years,
        }
    }

    /// Total outflow across all categories
    pub fn total(&self) -> f64 {
        self.principal + self.interest + self.overpayment + self.fixed_costs + self.recurring_fee
    }
}

/// Headline KPIs for a plan, measured against the same plan without overpayments
#[derive(Debug, Clone, Serialize)]
pub struct PlanOverview {
    pub inputs: MortgageInputs,
    #[serde(skip)]
    pub schedule: Schedule,
    pub summary: ScheduleSummary,
    pub baseline: ScheduleSummary,
    pub annual: Vec<AnnualSummary>,
    pub breakdown: CostBreakdown,

    /// Level payment before overpayments
    pub monthly_payment: f64,
    pub interest_saved: f64,
    pub years_saved: f64,
    pub deposit: f64,
    pub ltv_percent: f64,

    /// The plan is allowed but borrows more than the property is worth
    pub loan_exceeds_property_value: bool,
}

impl PlanOverview {
    pub fn build(inputs: &MortgageInputs) -> Result<Self, ValidationError> {
        let inputs = validate_inputs(inputs)?;
        let annual_costs = inputs.annual_costs();

        let schedule = amortize(&inputs)?;
        let summary = schedule.summary(annual_costs);
        let baseline = amortize(&inputs.without_overpayment())?.summary(annual_costs);

        let loan_exceeds_property_value = inputs.loan_amount > inputs.property_value;
        if loan_exceeds_property_value {
            log::warn!(
                "Loan amount {:.0} is higher than property value {:.0}",
                inputs.loan_amount,
                inputs.property_value
            );
        }

        Ok(Self {
            monthly_payment: monthly_payment(
                inputs.loan_amount,
                inputs.annual_rate_percent,
                inputs.term_years,
            ),
            interest_saved: baseline.total_interest - summary.total_interest,
            years_saved: baseline.years - summary.years,
            deposit: inputs.deposit(),
            ltv_percent: inputs.ltv_percent(),
            annual: schedule.annual_view(),
            breakdown: CostBreakdown::from_schedule(&schedule, &inputs),
            loan_exceeds_property_value,
            inputs,
            schedule,
            summary,
            baseline,
        })
    }
}
