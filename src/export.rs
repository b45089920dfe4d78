//! CSV export of generated planner data
//!
//! Only calculation output is written; headers come from the serde names on
//! each row type.

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::amortization::{AnnualSummary, Schedule, ScheduleSummary};
use crate::error::PlannerResult;
use crate::scenario::{HeatmapCell, ScenarioRow};

/// Write any serializable rows as CSV with a header line
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> PlannerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Year-by-year breakdown
pub fn write_annual<W: Write>(writer: W, annual: &[AnnualSummary]) -> PlannerResult<()> {
    write_rows(writer, annual)
}

/// Full month-by-month schedule
pub fn write_schedule<W: Write>(writer: W, schedule: &Schedule) -> PlannerResult<()> {
    write_rows(writer, schedule.rows())
}

pub fn write_scenarios<W: Write>(writer: W, rows: &[ScenarioRow]) -> PlannerResult<()> {
    write_rows(writer, rows)
}

pub fn write_heatmap<W: Write>(writer: W, cells: &[HeatmapCell]) -> PlannerResult<()> {
    write_rows(writer, cells)
}

/// One summary per plan, numbered from 1 in the `Plan` column
pub fn write_batch_summaries<W: Write>(writer: W, summaries: &[ScheduleSummary]) -> PlannerResult<()> {
    #[derive(Serialize)]
    struct BatchRow {
        #[serde(rename = "Plan")]
        plan: usize,
        #[serde(rename = "Months")]
        months: u32,
        #[serde(rename = "Years")]
        years: f64,
        #[serde(rename = "Total Interest")]
        total_interest: f64,
        #[serde(rename = "Total Paid to Lender")]
        total_paid_to_lender: f64,
        #[serde(rename = "Total Overpayment")]
        total_overpayment: f64,
        #[serde(rename = "All-in Cost")]
        all_in_housing_cost: f64,
    }

    let rows: Vec<BatchRow> = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| BatchRow {
            plan: i + 1,
            months: s.months,
            years: s.years,
            total_interest: s.total_interest,
            total_paid_to_lender: s.total_paid_to_lender,
            total_overpayment: s.total_overpayment,
            all_in_housing_cost: s.all_in_housing_cost,
        })
        .collect();
    write_rows(writer, &rows)
}

/// Create (or truncate) `path` and hand it to one of the writers above
pub fn to_path<P, F>(path: P, write: F) -> PlannerResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(File) -> PlannerResult<()>,
{
    let file = File::create(path.as_ref())?;
    write(file)?;
    log::info!("Wrote {}", path.as_ref().display());
    Ok(())
}
