//! BRRRR Projection CLI
//!
//! Command-line interface for projecting a single deal from a JSON file

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use brrrr_projection::deal::load_config;
use brrrr_projection::finance::calculate_minimum_arv;
use brrrr_projection::projection::{
    generate_projection, CashOnCash, IrrOutcome, MonthlySnapshot, ProjectionResult,
};
use brrrr_projection::scenario::compare_months;
use clap::Parser;
use log::info;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "brrrr_projection", version, about = "Project a rental deal month by month")]
struct Args {
    /// Deal configuration (JSON)
    config: PathBuf,

    /// Override the configured projection length
    #[arg(long)]
    months: Option<u32>,

    /// Write every monthly snapshot to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Compare two months, e.g. `--compare 1,12`
    #[arg(long, value_delimiter = ',')]
    compare: Option<Vec<u32>>,

    /// Number of months shown in the console table
    #[arg(long, default_value_t = 24)]
    limit: usize,
}

/// Flat CSV row for one monthly snapshot
#[derive(Debug, Serialize)]
struct SnapshotRow<'a> {
    month: u32,
    property_value: f64,
    total_investment: f64,
    remaining_investment: f64,
    loan_balance: f64,
    rent: f64,
    other_income: f64,
    mortgage: f64,
    taxes: f64,
    insurance: f64,
    maintenance: f64,
    property_management: f64,
    utilities: f64,
    vacancy_allowance: f64,
    other_expenses: f64,
    capital_reserves: f64,
    one_time_expense: f64,
    cash_flow: f64,
    total_cash_flow: f64,
    equity: f64,
    cash_on_cash: f64,
    event: &'a str,
}

impl<'a> From<&'a MonthlySnapshot> for SnapshotRow<'a> {
    fn from(s: &'a MonthlySnapshot) -> Self {
        Self {
            month: s.month,
            property_value: s.property_value,
            total_investment: s.total_investment,
            remaining_investment: s.remaining_investment,
            loan_balance: s.loan_balance,
            rent: s.monthly_income.rent,
            other_income: s.monthly_income.other_income,
            mortgage: s.monthly_expenses.mortgage,
            taxes: s.monthly_expenses.taxes,
            insurance: s.monthly_expenses.insurance,
            maintenance: s.monthly_expenses.maintenance,
            property_management: s.monthly_expenses.property_management,
            utilities: s.monthly_expenses.utilities,
            vacancy_allowance: s.monthly_expenses.vacancy_allowance,
            other_expenses: s.monthly_expenses.other_expenses,
            capital_reserves: s.monthly_expenses.capital_reserves,
            one_time_expense: s.one_time_expense,
            cash_flow: s.cash_flow,
            total_cash_flow: s.total_cash_flow,
            equity: s.equity,
            cash_on_cash: s.cash_on_cash.as_f64(),
            event: s.event_description.as_deref().unwrap_or(""),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(months) = args.months {
        config.projection_months = months;
    }

    let result = generate_projection(&config).context("projecting deal")?;
    info!("projection complete: {} months", result.months());

    if let Some(path) = &args.csv {
        write_csv(path, &result).with_context(|| format!("writing {}", path.display()))?;
        info!("snapshots written to {}", path.display());
    }

    if args.json {
        let stdout = io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &result).context("writing JSON")?;
        println!();
        return Ok(());
    }

    print_table(&result, args.limit);
    print_summary(&result);

    if let Some(first) = config.refinance_events.first() {
        if let Some(arv) = calculate_minimum_arv(
            result.summary.total_investment,
            first.refinance_ltv,
            first.refinance_closing_costs,
        ) {
            println!("  Minimum ARV for full recovery: ${:.2}", arv);
        }
    }

    if let Some(months) = &args.compare {
        let &[from, to] = months.as_slice() else {
            bail!("--compare takes exactly two months, e.g. 1,12");
        };
        let Some(comparison) = compare_months(&result, from, to) else {
            bail!("months {} and {} must both be within 1..={}", from, to, result.months());
        };
        println!("\nMonth {} -> Month {}:", from, to);
        println!("  Property value: {:+.2}", comparison.property_value_change);
        println!("  Equity:         {:+.2}", comparison.equity_change);
        println!("  Loan balance:   {:+.2}", comparison.loan_balance_change);
        println!("  Still invested: {:+.2}", comparison.remaining_investment_change);
        println!("  Cash flow:      {:+.2}", comparison.cash_flow_between);
    }

    Ok(())
}

fn write_csv(path: &Path, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for snapshot in &result.monthly_snapshots {
        writer.serialize(SnapshotRow::from(snapshot))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_table(result: &ProjectionResult, limit: usize) {
    println!("Projection Results ({} months):", result.months());
    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>10} {:>12} {:>8}  {}",
        "Month", "Value", "Loan", "Invested", "CashFlow", "Equity", "CoC", "Event"
    );
    println!("{}", "-".repeat(100));

    for s in result.monthly_snapshots.iter().take(limit) {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>7.2}%  {}",
            s.month,
            s.property_value,
            s.loan_balance,
            s.remaining_investment,
            s.cash_flow,
            s.equity,
            s.cash_on_cash.as_f64() * 100.0,
            s.event_description.as_deref().unwrap_or(""),
        );
    }

    if result.months() > limit {
        println!("... ({} more months)", result.months() - limit);
    }
}

fn print_summary(result: &ProjectionResult) {
    let summary = &result.summary;

    println!("\nSummary:");
    println!("  Total Investment: ${:.2}", summary.total_investment);
    println!("  Remaining Investment: ${:.2}", summary.remaining_investment);
    println!("  Total Cash Flow: ${:.2}", summary.total_cash_flow);
    println!("  Average Monthly Cash Flow: ${:.2}", summary.average_monthly_cash_flow);
    println!("  Final Property Value: ${:.2}", summary.final_property_value);
    println!("  Final Loan Balance: ${:.2}", summary.final_loan_balance);
    println!("  Final Equity: ${:.2}", summary.final_equity);
    println!("  Total Appreciation: ${:.2}", summary.total_appreciation);
    println!("  Return on Investment: {:.2}%", summary.return_on_investment * 100.0);
    match summary.cash_on_cash_return {
        CashOnCash::Return(value) => {
            println!("  Cash-on-Cash Return: {:.2}%", value * 100.0)
        }
        CashOnCash::FullyRecovered => {
            println!("  Cash-on-Cash Return: infinite (all capital recovered)")
        }
    }
    match summary.internal_rate_of_return {
        IrrOutcome::Solved { annual_rate, .. } => {
            println!("  IRR (annual): {:.2}%", annual_rate * 100.0)
        }
        IrrOutcome::Unsolved { reason } => println!("  IRR: unsolved ({:?})", reason),
    }
    println!("  Successful BRRRR: {}", summary.successful_brrrr);
}
