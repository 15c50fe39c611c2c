//! Project several deals side by side
//!
//! Usage: cargo run --bin compare_deals -- deal_a.json deal_b.json [--months 120]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use brrrr_projection::deal::load_config;
use brrrr_projection::projection::{CashOnCash, IrrOutcome, ProjectionSummary};
use brrrr_projection::scenario::run_batch;
use clap::Parser;
use log::warn;

#[derive(Debug, Parser)]
#[command(name = "compare_deals", about = "Compare projection summaries across deals")]
struct Args {
    /// Deal configurations (JSON)
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Project every deal over this many months
    #[arg(long)]
    months: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let configs = args
        .configs
        .iter()
        .map(|path| {
            let mut config =
                load_config(path).with_context(|| format!("loading {}", path.display()))?;
            if let Some(months) = args.months {
                config.projection_months = months;
            }
            Ok(config)
        })
        .collect::<Result<Vec<_>>>()?;

    let results = run_batch(&configs);
    println!("Projected {} deals in {:?}\n", results.len(), start.elapsed());

    println!(
        "{:<28} {:>6} {:>12} {:>12} {:>12} {:>10} {:>9} {:>9} {:>6}",
        "Deal", "Months", "Invested", "Remaining", "CashFlow", "Equity", "CoC", "IRR", "BRRRR"
    );
    println!("{}", "-".repeat(112));

    for (path, result) in args.configs.iter().zip(&results) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match result {
            Ok(result) => print_row(&name, result.months(), &result.summary),
            Err(e) => {
                warn!("{} failed validation: {}", path.display(), e);
                println!("{:<28} invalid: {}", name, e);
            }
        }
    }

    Ok(())
}

fn print_row(name: &str, months: usize, summary: &ProjectionSummary) {
    let coc = match summary.cash_on_cash_return {
        CashOnCash::Return(value) => format!("{:.2}%", value * 100.0),
        CashOnCash::FullyRecovered => "inf".to_string(),
    };
    let irr = match summary.internal_rate_of_return {
        IrrOutcome::Solved { annual_rate, .. } => format!("{:.2}%", annual_rate * 100.0),
        IrrOutcome::Unsolved { .. } => "n/a".to_string(),
    };

    println!(
        "{:<28} {:>6} {:>12.2} {:>12.2} {:>12.2} {:>10.2} {:>9} {:>9} {:>6}",
        name,
        months,
        summary.total_investment,
        summary.remaining_investment,
        summary.total_cash_flow,
        summary.final_equity,
        coc,
        irr,
        if summary.successful_brrrr { "yes" } else { "no" },
    );
}
