//! Mortgage Planner CLI
//!
//! Command-line front end for the amortization and scenario engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mortgage_planner::config::{parse_overpayment_levels, Currency, PlannerConfig};
use mortgage_planner::export;
use mortgage_planner::format::money;
use mortgage_planner::inputs::load_plans;
use mortgage_planner::{
    amortize, HeatmapGrid, PlanChoice, PlanOverview, ScenarioRange, ScenarioRunner,
};

#[derive(Parser)]
#[command(
    name = "mortgage_planner",
    version,
    about = "Mortgage planning calculator. Not financial advice."
)]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    inputs: InputArgs,

    /// Display currency (formatting only)
    #[arg(long, global = true, value_enum)]
    currency: Option<Currency>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct InputArgs {
    #[arg(long, global = true)]
    property_value: Option<f64>,
    #[arg(long, global = true)]
    loan_amount: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long, global = true)]
    rate: Option<f64>,
    #[arg(long, global = true)]
    term_years: Option<u32>,
    /// Fixed annual cost of running the house
    #[arg(long, global = true)]
    fixed_costs: Option<f64>,
    /// Annual recurring property fee
    #[arg(long, global = true)]
    recurring_fee: Option<f64>,
    /// Lump sum paid every 12th month
    #[arg(long, global = true)]
    overpayment: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// KPI cards and cost breakdown
    Summary,
    /// Month-by-month schedule
    Schedule {
        /// Months to print
        #[arg(long, default_value_t = 24)]
        months: usize,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Year-by-year breakdown
    Annual {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Rate sensitivity table
    Scenarios {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Mortgage-free years for each rate and overpayment level
    Heatmap {
        #[command(flatten)]
        range: RangeArgs,
        /// Comma-separated annual overpayments
        #[arg(long)]
        levels: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compare two rate/overpayment plans on the same principal and term
    Compare {
        #[arg(long)]
        rate_a: Option<f64>,
        #[arg(long)]
        overpay_a: Option<f64>,
        #[arg(long)]
        rate_b: Option<f64>,
        #[arg(long)]
        overpay_b: Option<f64>,
    },
    /// Summarize every plan in a CSV file
    Batch {
        #[arg(long)]
        plans: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Minimum scenario rate (%)
    #[arg(long)]
    low: Option<f64>,
    /// Maximum scenario rate (%)
    #[arg(long)]
    high: Option<f64>,
    /// Scenario step (%)
    #[arg(long)]
    step: Option<f64>,
}

impl RangeArgs {
    fn apply(&self, base: ScenarioRange) -> ScenarioRange {
        ScenarioRange::new(
            self.low.unwrap_or(base.low_rate),
            self.high.unwrap_or(base.high_rate),
            self.step.unwrap_or(base.step),
        )
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<PlannerConfig> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    config.apply_env_overrides();

    let args = &cli.inputs;
    let inputs = &mut config.inputs;
    if let Some(v) = args.property_value {
        inputs.property_value = v;
    }
    if let Some(v) = args.loan_amount {
        inputs.loan_amount = v;
    }
    if let Some(v) = args.rate {
        inputs.annual_rate_percent = v;
    }
    if let Some(v) = args.term_years {
        inputs.term_years = v;
    }
    if let Some(v) = args.fixed_costs {
        inputs.annual_fixed_costs = v;
    }
    if let Some(v) = args.recurring_fee {
        inputs.annual_recurring_fee = v;
    }
    if let Some(v) = args.overpayment {
        inputs.annual_overpayment = v;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let currency = config.currency;
    let inputs = config.inputs;

    match cli.command {
        Command::Summary => {
            let overview = PlanOverview::build(&inputs).context("Input validation error")?;
            print_overview(&overview, currency);
        }
        Command::Schedule { months, csv } => {
            let schedule = amortize(&inputs).context("Input validation error")?;

            println!(
                "{:>5} {:>4} {:>14} {:>12} {:>12} {:>12} {:>12} {:>14}",
                "Month",
                "Year",
                "Start",
                "Payment",
                "Interest",
                "Principal",
                "Overpay",
                "End"
            );
            println!("{}", "-".repeat(92));
            for row in schedule.rows().iter().take(months) {
                println!(
                    "{:>5} {:>4} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                    row.month,
                    row.year,
                    row.starting_balance,
                    row.payment,
                    row.interest,
                    row.principal,
                    row.overpayment,
                    row.ending_balance
                );
            }
            if schedule.len() > months {
                println!("... ({} more months)", schedule.len() - months);
            }

            if let Some(path) = csv {
                export::to_path(&path, |file| export::write_schedule(file, &schedule))
                    .context("Failed to write schedule CSV")?;
                println!("\nFull schedule written to: {}", path.display());
            }
        }
        Command::Annual { csv } => {
            let schedule = amortize(&inputs).context("Input validation error")?;
            let annual = schedule.annual_view();

            println!(
                "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
                "Year",
                "Payment",
                "Interest",
                "Principal",
                "Overpayment",
                "End Balance"
            );
            println!("{}", "-".repeat(80));
            for year in &annual {
                println!(
                    "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
                    year.year,
                    money(year.annual_payment, currency),
                    money(year.annual_interest, currency),
                    money(year.annual_principal, currency),
                    money(year.annual_overpayment, currency),
                    money(year.ending_balance, currency)
                );
            }

            if let Some(path) = csv {
                export::to_path(&path, |file| export::write_annual(file, &annual))
                    .context("Failed to write annual CSV")?;
                println!("\nAnnual cashflow written to: {}", path.display());
            }
        }
        Command::Scenarios { range, csv } => {
            let runner = ScenarioRunner::new(&inputs).context("Input validation error")?;
            let rows = runner
                .rate_analysis(&range.apply(config.scenario))
                .context("Input validation error")?;

            println!(
                "{:>7} {:>14} {:>8} {:>7} {:>14} {:>16} {:>16}",
                "Rate %",
                "Payment",
                "Years",
                "Months",
                "Interest",
                "Paid to Lender",
                "All-in"
            );
            println!("{}", "-".repeat(88));
            for row in &rows {
                println!(
                    "{:>7.2} {:>14} {:>8.2} {:>7} {:>14} {:>16} {:>16}",
                    row.rate,
                    money(row.monthly_payment, currency),
                    row.years,
                    row.months,
                    money(row.total_interest, currency),
                    money(row.total_paid_to_lender, currency),
                    money(row.all_in_cost, currency)
                );
            }

            if let Some(path) = csv {
                export::to_path(&path, |file| export::write_scenarios(file, &rows))
                    .context("Failed to write scenario CSV")?;
            }
        }
        Command::Heatmap { range, levels, csv } => {
            let levels = match levels {
                Some(text) => parse_overpayment_levels(&text),
                None => config.overpayment_levels.clone(),
            };
            let runner = ScenarioRunner::new(&inputs).context("Input validation error")?;
            let cells = runner
                .heatmap(&range.apply(config.scenario), &levels)
                .context("Input validation error")?;
            let grid = HeatmapGrid::from_cells(&cells);

            println!("Mortgage-free years (rows: annual overpayment, columns: rate %)\n");
            print!("{:>14}", "");
            for rate in &grid.rates {
                print!(" {:>7.2}", rate);
            }
            println!();
            for (overpayment, years) in grid.overpayments.iter().zip(&grid.years) {
                print!("{:>14}", money(*overpayment, currency));
                for value in years {
                    match value {
                        Some(y) => print!(" {:>7.1}", y),
                        None => print!(" {:>7}", "-"),
                    }
                }
                println!();
            }

            if let Some(path) = csv {
                export::to_path(&path, |file| export::write_heatmap(file, &cells))
                    .context("Failed to write heatmap CSV")?;
            }
        }
        Command::Compare {
            rate_a,
            overpay_a,
            rate_b,
            overpay_b,
        } => {
            let runner = ScenarioRunner::new(&inputs).context("Input validation error")?;
            let plan_a = PlanChoice::new(
                rate_a.unwrap_or(inputs.annual_rate_percent),
                overpay_a.unwrap_or(inputs.annual_overpayment),
            );
            let plan_b = PlanChoice::new(
                rate_b.unwrap_or((inputs.annual_rate_percent - 1.0).max(0.0)),
                overpay_b.unwrap_or(inputs.annual_overpayment),
            );
            let comparison = runner.compare(plan_a, plan_b).context("Input validation error")?;

            println!(
                "Plan A: {:.2}% with {} overpaid yearly",
                plan_a.rate,
                money(plan_a.annual_overpayment, currency)
            );
            println!(
                "Plan B: {:.2}% with {} overpaid yearly\n",
                plan_b.rate,
                money(plan_b.annual_overpayment, currency)
            );
            println!(
                "{:<22} {:>16} {:>16} {:>18}",
                "Metric", "Plan A", "Plan B", "Difference (A-B)"
            );
            println!("{}", "-".repeat(75));
            for line in &comparison.lines {
                let show = |v: f64| {
                    if line.metric.is_currency() {
                        money(v, currency)
                    } else {
                        format!("{:.2}", v)
                    }
                };
                println!(
                    "{:<22} {:>16} {:>16} {:>18}",
                    line.metric.label(),
                    show(line.plan_a),
                    show(line.plan_b),
                    show(line.difference)
                );
            }
        }
        Command::Batch { plans, csv } => {
            let plans = load_plans(&plans)
                .with_context(|| format!("Failed to load plans from {}", plans.display()))?;
            log::info!("Summarizing {} plans", plans.len());

            let mut summaries = Vec::with_capacity(plans.len());
            println!(
                "{:>4} {:>14} {:>7} {:>8} {:>14} {:>16}",
                "Plan", "Loan", "Rate %", "Years", "Interest", "All-in"
            );
            println!("{}", "-".repeat(68));
            for (i, plan) in plans.iter().enumerate() {
                let summary = amortize(plan)
                    .context("Input validation error")?
                    .summary(plan.annual_costs());
                println!(
                    "{:>4} {:>14} {:>7.2} {:>8.2} {:>14} {:>16}",
                    i + 1,
                    money(plan.loan_amount, currency),
                    plan.annual_rate_percent,
                    summary.years,
                    money(summary.total_interest, currency),
                    money(summary.all_in_housing_cost, currency)
                );
                summaries.push(summary);
            }

            if let Some(path) = csv {
                export::to_path(&path, |file| export::write_batch_summaries(file, &summaries))
                    .context("Failed to write batch CSV")?;
            }
        }
    }

    Ok(())
}

fn print_overview(overview: &PlanOverview, currency: Currency) {
    let summary = &overview.summary;

    println!("Mortgage Planning Summary");
    println!("=========================\n");
    println!("  Monthly payment:     {}", money(overview.monthly_payment, currency));
    println!(
        "  Mortgage-free in:    {:.1} years ({:.2} years faster)",
        summary.years, overview.years_saved
    );
    println!(
        "  Total interest:      {} ({} saved)",
        money(summary.total_interest, currency),
        money(overview.interest_saved, currency)
    );
    println!(
        "  Calculated deposit:  {} (LTV {:.1}%)",
        money(overview.deposit, currency),
        overview.ltv_percent
    );
    println!("  Paid to lender:      {}", money(summary.total_paid_to_lender, currency));
    println!("  All-in housing cost: {}", money(summary.all_in_housing_cost, currency));

    if overview.loan_exceeds_property_value {
        println!("\n  Note: loan amount is higher than property value. Double-check the inputs.");
    }

    let breakdown = &overview.breakdown;
    println!("\nWhere the money goes:");
    for (label, value) in [
        ("Principal", breakdown.principal),
        ("Interest", breakdown.interest),
        ("Overpayment", breakdown.overpayment),
        ("Fixed costs", breakdown.fixed_costs),
        ("Recurring fee", breakdown.recurring_fee),
    ] {
        println!("  {:<14} {:>14}", label, money(value, currency));
    }
    println!("  {:<14} {:>14}", "Total", money(breakdown.total(), currency));
}
