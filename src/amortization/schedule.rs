//! Schedule output structures and their aggregations

use serde::{Deserialize, Serialize};

/// A single simulated month
///
/// Column names match the annual CSV export headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Starting Balance")]
    pub starting_balance: f64,

    /// Scheduled payment actually made this month (interest + principal)
    #[serde(rename = "Payment")]
    pub payment: f64,
    #[serde(rename = "Interest")]
    pub interest: f64,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "Overpayment")]
    pub overpayment: f64,
    #[serde(rename = "Ending Balance")]
    pub ending_balance: f64,

    // Running totals including this month
    #[serde(rename = "Cumulative Interest")]
    pub cumulative_interest: f64,
    #[serde(rename = "Cumulative Principal")]
    pub cumulative_principal: f64,
    #[serde(rename = "Cumulative Overpayment")]
    pub cumulative_overpayment: f64,
}

/// Output of one simulation run, in increasing month order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    /// A schedule with no months (nothing was borrowed)
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(months: usize) -> Self {
        Self {
            rows: Vec::with_capacity(months),
        }
    }

    pub(crate) fn add_row(&mut self, row: ScheduleRow) {
        debug_assert!(self.rows.last().map_or(true, |last| last.month < row.month));
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }

    /// Balance left after the final month (0 for an empty schedule)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.ending_balance).unwrap_or(0.0)
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    pub fn total_payment(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    pub fn total_overpayment(&self) -> f64 {
        self.rows.iter().map(|r| r.overpayment).sum()
    }

    /// See [`summarize`]
    pub fn summary(&self, annual_costs: f64) -> ScheduleSummary {
        summarize(self, annual_costs)
    }

    /// See [`annual_view`]
    pub fn annual_view(&self) -> Vec<AnnualSummary> {
        annual_view(self)
    }
}

/// Whole-loan totals for a schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Months until the loan is cleared
    pub months: u32,
    /// `months / 12`, fractional
    pub years: f64,
    pub total_interest: f64,
    /// Scheduled payments plus overpayments
    pub total_paid_to_lender: f64,
    pub total_overpayment: f64,
    /// Paid to lender plus non-loan housing costs over the loan's life
    pub all_in_housing_cost: f64,
}

/// One row per loan year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Annual Payment")]
    pub annual_payment: f64,
    #[serde(rename = "Annual Interest")]
    pub annual_interest: f64,
    #[serde(rename = "Annual Principal")]
    pub annual_principal: f64,
    #[serde(rename = "Annual Overpayment")]
    pub annual_overpayment: f64,
    #[serde(rename = "Ending Balance")]
    pub ending_balance: f64,
}

/// Reduce a schedule to whole-loan totals
///
/// `annual_costs` are the non-loan housing costs per year, charged for the
/// (fractional) number of years the loan runs. An empty schedule yields an
/// all-zero summary.
pub fn summarize(schedule: &Schedule, annual_costs: f64) -> ScheduleSummary {
    let Some(last) = schedule.last() else {
        return ScheduleSummary::default();
    };

    let months = last.month;
    let years = months as f64 / 12.0;
    let total_payment = schedule.total_payment();
    let total_overpayment = schedule.total_overpayment();
    let paid_to_lender = total_payment + total_overpayment;

    ScheduleSummary {
        months,
        years,
        total_interest: schedule.total_interest(),
        total_paid_to_lender: paid_to_lender,
        total_overpayment,
        all_in_housing_cost: paid_to_lender + annual_costs * years,
    }
}

/// Roll the monthly rows up into one row per year, ascending
pub fn annual_view(schedule: &Schedule) -> Vec<AnnualSummary> {
    let mut years: Vec<AnnualSummary> = Vec::new();

    for row in schedule.rows() {
        match years.last_mut() {
            Some(current) if current.year == row.year => {
                current.annual_payment += row.payment;
                current.annual_interest += row.interest;
                current.annual_principal += row.principal;
                current.annual_overpayment += row.overpayment;
                current.ending_balance = row.ending_balance;
            }
            _ => years.push(AnnualSummary {
                year: row.year,
                annual_payment: row.payment,
                annual_interest: row.interest,
                annual_principal: row.principal,
                annual_overpayment: row.overpayment,
                ending_balance: row.ending_balance,
            }),
        }
    }

    years
}
