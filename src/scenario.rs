//! Scenario sweeps over rates and overpayment levels
//!
//! Validates the base plan once, then re-runs the amortization for each
//! (rate, overpayment) variant. Nothing is cached between calls.
//!
//! # Example
//! ```
//! use mortgage_planner::{default_inputs, ScenarioRange, ScenarioRunner};
//!
//! let runner = ScenarioRunner::new(&default_inputs()).unwrap();
//! let rows = runner.rate_analysis(&ScenarioRange::new(3.0, 4.0, 0.5)).unwrap();
//! assert_eq!(rows.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, monthly_payment};
use crate::error::ValidationError;
use crate::inputs::{validate_inputs, validate_scenario_range, MortgageInputs, ScenarioRange};

/// Headline figures for one (rate, overpayment) variant of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    #[serde(rename = "Rate %")]
    pub rate: f64,
    #[serde(rename = "Annual Overpayment")]
    pub annual_overpayment: f64,
    #[serde(rename = "Monthly Payment (before overpay)")]
    pub monthly_payment: f64,
    #[serde(rename = "Mortgage-Free in Years")]
    pub years: f64,
    #[serde(rename = "Mortgage-Free in Months")]
    pub months: u32,
    #[serde(rename = "Total Interest")]
    pub total_interest: f64,
    #[serde(rename = "Total Paid to Lender")]
    pub total_paid_to_lender: f64,
    #[serde(rename = "All-in Cost")]
    pub all_in_cost: f64,
}

/// One cell of the rate x overpayment grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    #[serde(rename = "Rate %")]
    pub rate: f64,
    #[serde(rename = "Annual Overpayment")]
    pub annual_overpayment: f64,
    #[serde(rename = "Mortgage-Free in Years")]
    pub years: f64,
    #[serde(rename = "Total Interest")]
    pub total_interest: f64,
}

/// Heatmap cells pivoted into a matrix
///
/// Rows are overpayment levels, columns are rates, both ascending and unique.
/// Each value is mortgage-free years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub rates: Vec<f64>,
    pub overpayments: Vec<f64>,
    pub years: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    pub fn from_cells(cells: &[HeatmapCell]) -> Self {
        let rates = sorted_unique(cells.iter().map(|c| c.rate));
        let overpayments = sorted_unique(cells.iter().map(|c| c.annual_overpayment));

        let mut years = vec![vec![None; rates.len()]; overpayments.len()];
        for cell in cells {
            let row = overpayments.iter().position(|&o| o == cell.annual_overpayment);
            let col = rates.iter().position(|&r| r == cell.rate);
            if let (Some(row), Some(col)) = (row, col) {
                years[row][col] = Some(cell.years);
            }
        }

        Self {
            rates,
            overpayments,
            years,
        }
    }

    /// Years for a given overpayment level and rate, if that cell was computed
    pub fn get(&self, overpayment: f64, rate: f64) -> Option<f64> {
        let row = self.overpayments.iter().position(|&o| o == overpayment)?;
        let col = self.rates.iter().position(|&r| r == rate)?;
        self.years[row][col]
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// A rate and overpayment choice applied to the base plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanChoice {
    pub rate: f64,
    pub annual_overpayment: f64,
}

impl PlanChoice {
    pub fn new(rate: f64, annual_overpayment: f64) -> Self {
        Self {
            rate,
            annual_overpayment,
        }
    }
}

/// Metrics shown side by side when comparing two plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonMetric {
    MonthlyPayment,
    MortgageFreeYears,
    TotalInterest,
    TotalPaidToLender,
    AllInCost,
}

impl ComparisonMetric {
    pub const ALL: [ComparisonMetric; 5] = [
        ComparisonMetric::MonthlyPayment,
        ComparisonMetric::MortgageFreeYears,
        ComparisonMetric::TotalInterest,
        ComparisonMetric::TotalPaidToLender,
        ComparisonMetric::AllInCost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonMetric::MonthlyPayment => "Monthly Payment",
            ComparisonMetric::MortgageFreeYears => "Mortgage-Free Years",
            ComparisonMetric::TotalInterest => "Total Interest",
            ComparisonMetric::TotalPaidToLender => "Total Paid to Lender",
            ComparisonMetric::AllInCost => "All-in Cost",
        }
    }

    /// Whether the metric is a money amount (as opposed to years)
    pub fn is_currency(&self) -> bool {
        !matches!(self, ComparisonMetric::MortgageFreeYears)
    }

    fn value(&self, row: &ScenarioRow) -> f64 {
        match self {
            ComparisonMetric::MonthlyPayment => row.monthly_payment,
            ComparisonMetric::MortgageFreeYears => row.years,
            ComparisonMetric::TotalInterest => row.total_interest,
            ComparisonMetric::TotalPaidToLender => row.total_paid_to_lender,
            ComparisonMetric::AllInCost => row.all_in_cost,
        }
    }
}

/// One metric for both plans and their difference (A - B)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonLine {
    pub metric: ComparisonMetric,
    pub plan_a: f64,
    pub plan_b: f64,
    pub difference: f64,
}

/// Two variants of the same principal and term, side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanComparison {
    pub plan_a: ScenarioRow,
    pub plan_b: ScenarioRow,
    pub lines: Vec<ComparisonLine>,
}

impl PlanComparison {
    fn new(plan_a: ScenarioRow, plan_b: ScenarioRow) -> Self {
        let lines = ComparisonMetric::ALL
            .iter()
            .map(|&metric| {
                let a = metric.value(&plan_a);
                let b = metric.value(&plan_b);
                ComparisonLine {
                    metric,
                    plan_a: a,
                    plan_b: b,
                    difference: a - b,
                }
            })
            .collect();

        Self {
            plan_a,
            plan_b,
            lines,
        }
    }

    pub fn line(&self, metric: ComparisonMetric) -> Option<&ComparisonLine> {
        self.lines.iter().find(|l| l.metric == metric)
    }
}

/// Rates from low upward in `step` increments, rounded to 4 dp
///
/// The step count is the span over `step` rounded to the nearest whole
/// number. When `step` does not divide the span, the last point may land up
/// to half a step beyond `high` (3..4 by 0.6 gives 3.0, 3.6, 4.2).
pub fn rate_grid(scenario_range: &ScenarioRange) -> Result<Vec<f64>, ValidationError> {
    let range = validate_scenario_range(scenario_range)?;

    let steps = ((range.high_rate - range.low_rate) / range.step).round() as u32;
    let mut rates: Vec<f64> = (0..=steps)
        .map(|i| round_rate(range.low_rate + i as f64 * range.step))
        .collect();
    rates.sort_by(f64::total_cmp);
    rates.dedup();

    log::debug!(
        "Rate grid {}..{} step {}: {} points",
        range.low_rate,
        range.high_rate,
        range.step,
        rates.len()
    );
    Ok(rates)
}

fn round_rate(rate: f64) -> f64 {
    (rate * 10_000.0).round() / 10_000.0
}

/// Base plan prepared for repeated what-if runs
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: MortgageInputs,
}

impl ScenarioRunner {
    /// Validate the base plan once
    pub fn new(base_inputs: &MortgageInputs) -> Result<Self, ValidationError> {
        Ok(Self {
            base: validate_inputs(base_inputs)?,
        })
    }

    pub fn base(&self) -> &MortgageInputs {
        &self.base
    }

    /// Run the base plan at a different rate and overpayment
    pub fn run(&self, rate: f64, annual_overpayment: f64) -> Result<ScenarioRow, ValidationError> {
        let inputs = validate_inputs(&self.base.with_scenario(rate, annual_overpayment))?;
        let schedule = amortize(&inputs)?;
        let summary = schedule.summary(inputs.annual_costs());

        Ok(ScenarioRow {
            rate,
            annual_overpayment,
            monthly_payment: monthly_payment(
                inputs.loan_amount,
                inputs.annual_rate_percent,
                inputs.term_years,
            ),
            years: summary.years,
            months: summary.months,
            total_interest: summary.total_interest,
            total_paid_to_lender: summary.total_paid_to_lender,
            all_in_cost: summary.all_in_housing_cost,
        })
    }

    /// One row per grid rate, keeping the base overpayment
    pub fn rate_analysis(
        &self,
        scenario_range: &ScenarioRange,
    ) -> Result<Vec<ScenarioRow>, ValidationError> {
        let rates = rate_grid(scenario_range)?;
        log::info!("Running rate analysis over {} rates", rates.len());

        rates
            .into_iter()
            .map(|rate| self.run(rate, self.base.annual_overpayment))
            .collect()
    }

    /// Every grid rate crossed with every overpayment level, levels in caller order
    pub fn heatmap(
        &self,
        scenario_range: &ScenarioRange,
        overpayment_levels: &[f64],
    ) -> Result<Vec<HeatmapCell>, ValidationError> {
        let rates = rate_grid(scenario_range)?;
        log::info!(
            "Building heatmap: {} rates x {} overpayment levels",
            rates.len(),
            overpayment_levels.len()
        );

        let mut cells = Vec::with_capacity(rates.len() * overpayment_levels.len());
        for &rate in &rates {
            for &overpayment in overpayment_levels {
                let row = self.run(rate, overpayment)?;
                cells.push(HeatmapCell {
                    rate,
                    annual_overpayment: overpayment,
                    years: row.years,
                    total_interest: row.total_interest,
                });
            }
        }
        Ok(cells)
    }

    /// Compare two rate/overpayment choices on the base principal and term
    pub fn compare(
        &self,
        plan_a: PlanChoice,
        plan_b: PlanChoice,
    ) -> Result<PlanComparison, ValidationError> {
        let a = self.run(plan_a.rate, plan_a.annual_overpayment)?;
        let b = self.run(plan_b.rate, plan_b.annual_overpayment)?;
        Ok(PlanComparison::new(a, b))
    }
}

/// Run `base_inputs` with a substituted rate and overpayment
pub fn scenario_result(
    base_inputs: &MortgageInputs,
    rate: f64,
    annual_overpayment: f64,
) -> Result<ScenarioRow, ValidationError> {
    ScenarioRunner::new(base_inputs)?.run(rate, annual_overpayment)
}

/// Sweep the rate grid at the plan's own overpayment
pub fn scenario_analysis(
    inputs: &MortgageInputs,
    scenario_range: &ScenarioRange,
) -> Result<Vec<ScenarioRow>, ValidationError> {
    ScenarioRunner::new(inputs)?.rate_analysis(scenario_range)
}

/// Sweep the rate grid against each overpayment level
pub fn build_heatmap_data(
    inputs: &MortgageInputs,
    scenario_range: &ScenarioRange,
    overpayment_levels: &[f64],
) -> Result<Vec<HeatmapCell>, ValidationError> {
    ScenarioRunner::new(inputs)?.heatmap(scenario_range, overpayment_levels)
}

/// Compare two plans that share the base principal and term
pub fn compare_plans(
    inputs: &MortgageInputs,
    plan_a: PlanChoice,
    plan_b: PlanChoice,
) -> Result<PlanComparison, ValidationError> {
    ScenarioRunner::new(inputs)?.compare(plan_a, plan_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::summarize;
    use crate::inputs::default_inputs;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rate_grid_includes_endpoints() {
        assert_eq!(
            rate_grid(&ScenarioRange::new(3.0, 4.0, 0.5)).unwrap(),
            vec![3.0, 3.5, 4.0]
        );

        let tenths = rate_grid(&ScenarioRange::new(3.0, 4.0, 0.1)).unwrap();
        assert_eq!(tenths.len(), 11);
        assert_eq!(tenths[3], 3.3);
        assert_eq!(tenths[10], 4.0);
    }

    #[test]
    fn test_rate_grid_uneven_step_rounds_count() {
        // 2.5 steps rounds up to 3
        assert_eq!(
            rate_grid(&ScenarioRange::new(3.0, 4.0, 0.4)).unwrap(),
            vec![3.0, 3.4, 3.8, 4.2]
        );
        // 1.67 steps rounds up to 2
        assert_eq!(
            rate_grid(&ScenarioRange::new(3.0, 4.0, 0.6)).unwrap(),
            vec![3.0, 3.6, 4.2]
        );
        // 3.33 steps rounds down to 3
        assert_eq!(
            rate_grid(&ScenarioRange::new(0.0, 1.0, 0.3)).unwrap(),
            vec![0.0, 0.3, 0.6, 0.9]
        );
        assert_eq!(rate_grid(&ScenarioRange::new(5.0, 5.0, 0.25)).unwrap(), vec![5.0]);
    }

    #[test]
    fn test_rate_grid_normalizes_reversed_range() {
        assert_eq!(
            rate_grid(&ScenarioRange::new(4.0, 3.0, 0.5)).unwrap(),
            vec![3.0, 3.5, 4.0]
        );
    }

    #[test]
    fn test_scenario_analysis_row_count() {
        let rows =
            scenario_analysis(&default_inputs(), &ScenarioRange::new(3.0, 4.0, 0.5)).unwrap();

        assert_eq!(rows.len(), 3);
        let rates: Vec<f64> = rows.iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![3.0, 3.5, 4.0]);
        assert!(rows.iter().all(|r| r.annual_overpayment == 6_000.0));

        // Higher rate costs more interest
        assert!(rows[2].total_interest > rows[0].total_interest);
        assert!(rows[2].monthly_payment > rows[0].monthly_payment);
    }

    #[test]
    fn test_scenario_analysis_offset_low_rate() {
        let rows =
            scenario_analysis(&default_inputs(), &ScenarioRange::new(3.05, 4.0, 0.5)).unwrap();

        let rates: Vec<f64> = rows.iter().map(|r| r.rate).collect();
        assert_eq!(rates, vec![3.05, 3.55, 4.05]);
    }

    #[test]
    fn test_scenario_result_matches_direct_run() {
        let base = default_inputs();
        let row = scenario_result(&base, 4.0, 3_000.0).unwrap();

        let inputs = base.with_scenario(4.0, 3_000.0);
        let schedule = amortize(&inputs).unwrap();
        let summary = summarize(&schedule, inputs.annual_costs());

        assert_eq!(row.months, summary.months);
        assert_abs_diff_eq!(row.total_interest, summary.total_interest);
        assert_abs_diff_eq!(row.all_in_cost, summary.all_in_housing_cost);
        assert_abs_diff_eq!(row.monthly_payment, monthly_payment(240_000.0, 4.0, 30));
    }

    #[test]
    fn test_scenario_result_rejects_invalid_variant() {
        assert_eq!(
            scenario_result(&default_inputs(), 31.0, 0.0),
            Err(ValidationError::UnrealisticRate(31.0))
        );
        assert_eq!(
            scenario_result(&default_inputs(), 4.0, -100.0),
            Err(ValidationError::Negative { field: "Annual overpayment" })
        );
    }

    #[test]
    fn test_heatmap_data_shape() {
        let levels = [0.0, 6_000.0];
        let range = ScenarioRange::new(3.0, 4.0, 0.5);
        let cells = build_heatmap_data(&default_inputs(), &range, &levels).unwrap();

        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| levels.contains(&c.annual_overpayment)));
    }

    #[test]
    fn test_heatmap_keeps_caller_level_order() {
        let levels = [12_000.0, 0.0];
        let range = ScenarioRange::new(4.0, 4.0, 0.5);
        let cells = build_heatmap_data(&default_inputs(), &range, &levels).unwrap();

        assert_eq!(cells[0].annual_overpayment, 12_000.0);
        assert_eq!(cells[1].annual_overpayment, 0.0);
        assert!(cells[0].years < cells[1].years);
    }

    #[test]
    fn test_heatmap_grid_pivot() {
        let cells = build_heatmap_data(
            &default_inputs(),
            &ScenarioRange::new(3.0, 4.0, 0.5),
            &[6_000.0, 0.0],
        )
        .unwrap();
        let grid = HeatmapGrid::from_cells(&cells);

        assert_eq!(grid.rates, vec![3.0, 3.5, 4.0]);
        assert_eq!(grid.overpayments, vec![0.0, 6_000.0]);
        assert_eq!(grid.years.len(), 2);
        assert!(grid.years.iter().all(|row| row.len() == 3 && row.iter().all(Option::is_some)));

        let no_overpay = grid.get(0.0, 3.5).unwrap();
        let with_overpay = grid.get(6_000.0, 3.5).unwrap();
        assert!(with_overpay < no_overpay);
        assert_eq!(grid.get(1.0, 3.5), None);
    }

    #[test]
    fn test_compare_plans() {
        let comparison = compare_plans(
            &default_inputs(),
            PlanChoice::new(5.0, 6_000.0),
            PlanChoice::new(4.0, 6_000.0),
        )
        .unwrap();

        assert_eq!(comparison.lines.len(), 5);
        let interest = comparison.line(ComparisonMetric::TotalInterest).unwrap();
        assert_abs_diff_eq!(interest.difference, interest.plan_a - interest.plan_b);
        assert!(interest.difference > 0.0);

        let years = comparison.line(ComparisonMetric::MortgageFreeYears).unwrap();
        assert!(!years.metric.is_currency());
        assert_eq!(years.plan_a, comparison.plan_a.years);
    }
}
