//! Smith Manoeuvre CLI
//!
//! Runs a scenario file day by day, or sweeps a set of variations in parallel

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smith_manoeuvre::config::{load_variations, DEFAULT_SCENARIO_PATH};
use smith_manoeuvre::scenario::write_sweep_csv;
use smith_manoeuvre::simulation::export::write_ledger_csv_path;
use smith_manoeuvre::simulation::Termination;
use smith_manoeuvre::ScenarioRunner;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "smith_manoeuvre", version, about = "Smith Manoeuvre mortgage/HELOC simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one scenario and write its ledger
    Run {
        /// Scenario JSON file
        #[arg(short, long, default_value = DEFAULT_SCENARIO_PATH)]
        config: PathBuf,

        /// Ledger CSV output
        #[arg(short, long, default_value = "ledger_output.csv")]
        output: PathBuf,

        /// Override the number of simulated days
        #[arg(long)]
        steps: Option<u32>,
    },

    /// Run every row of a variations CSV against a base scenario
    Sweep {
        /// Base scenario JSON file
        #[arg(short, long, default_value = DEFAULT_SCENARIO_PATH)]
        config: PathBuf,

        /// Variations CSV, one row per run
        #[arg(short, long)]
        variations: PathBuf,

        /// Summary CSV output
        #[arg(short, long, default_value = "sweep_output.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, output, steps } => run(config, output, steps),
        Command::Sweep { config, variations, output } => sweep(config, variations, output),
    }
}

fn run(config: PathBuf, output: PathBuf, steps: Option<u32>) -> Result<()> {
    let runner = ScenarioRunner::from_path(&config)
        .with_context(|| format!("loading scenario {}", config.display()))?;
    let scenario = runner.scenario();

    println!("Smith Manoeuvre v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Mortgage:");
    println!("  Principal: ${:.2}", scenario.mortgage.principal);
    println!("  Available Equity: ${:.2}", scenario.mortgage.available_equity);
    println!("  Rate: {:.2}%  HELOC Rate: {:.2}%", scenario.mortgage.interest_rate_pct, scenario.mortgage.heloc_interest_rate_pct);
    println!("  Frequency: {}", scenario.mortgage.payment_frequency);
    println!("Investment:");
    println!("  Opening Draw: ${:.2}", scenario.initial_heloc_draw);
    println!("  Dividend Yield: {:.2}% ({})", scenario.investment.dividend_yield_pct, scenario.investment.dividend_frequency);
    println!();

    let start = Instant::now();
    let result = match steps {
        Some(n) => runner.run_for(n),
        None => runner.run(),
    }
    .context("simulation failed")?;
    println!("Simulated in {:?}", start.elapsed());

    println!("{:>10} {:>12} {:>12} {:>14} {:>12} {:>14} {:>10} {:>10}",
        "Date", "Interest", "Principal", "Remaining", "HELOC Int", "Investments", "Dividends", "Cash");
    println!("{}", "-".repeat(102));
    for row in result.rows.iter().take(24) {
        println!("{:>10} {:>12.2} {:>12.2} {:>14.2} {:>12.2} {:>14.2} {:>10.2} {:>10.2}",
            row.date.to_string(),
            row.mortgage_interest_paid,
            row.mortgage_principal_paid + row.prepayment,
            row.mortgage_principal_remaining,
            row.heloc_interest_capitalized,
            row.investment_balance,
            row.dividends_collected,
            row.cash_out_of_pocket,
        );
    }
    if result.rows.len() > 24 {
        println!("... ({} more rows)", result.rows.len() - 24);
    }

    write_ledger_csv_path(&output, &result.rows)
        .with_context(|| format!("writing ledger {}", output.display()))?;
    println!("\nFull ledger written to: {}", output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Ledger Rows: {}", summary.ledger_rows);
    println!("  Mortgage Interest: ${:.2}", summary.total_mortgage_interest);
    println!("  Scheduled Principal: ${:.2}", summary.total_scheduled_principal);
    println!("  Prepayments: ${:.2}", summary.total_prepayments);
    println!("  HELOC Interest: ${:.2}", summary.total_heloc_interest);
    println!("  Dividends: ${:.2}", summary.total_dividends);
    println!("  Tax Refunds: ${:.2}", summary.total_tax_refunds);
    println!("  Max Out of Pocket: ${:.2}", summary.max_out_of_pocket);
    println!("  Final Principal: ${:.2}", summary.final_principal);
    println!("  Final HELOC Balance: ${:.2}", summary.final_heloc_balance);
    println!("  Final Investments: ${:.2}", summary.final_investment_balance);
    match result.termination {
        Termination::PaidOff(date) => println!("  Paid off: {}", date),
        Termination::HorizonReached => println!("  Horizon reached"),
    }

    Ok(())
}

fn sweep(config: PathBuf, variations_path: PathBuf, output: PathBuf) -> Result<()> {
    let runner = ScenarioRunner::from_path(&config)
        .with_context(|| format!("loading scenario {}", config.display()))?;
    let variations = load_variations(&variations_path)
        .with_context(|| format!("loading variations {}", variations_path.display()))?;

    println!("Running {} variations...", variations.len());
    let start = Instant::now();
    let outcomes = runner.run_sweep(&variations);
    println!("Sweep complete in {:?}", start.elapsed());

    println!("{:<20} {:>12} {:>14} {:>14} {:>12}",
        "Label", "Paid Off", "Principal", "Investments", "Dividends");
    println!("{}", "-".repeat(76));
    for outcome in &outcomes {
        match &outcome.summary {
            Ok(s) => println!("{:<20} {:>12} {:>14.2} {:>14.2} {:>12.2}",
                outcome.label,
                s.paid_off.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                s.final_principal,
                s.final_investment_balance,
                s.total_dividends,
            ),
            Err(e) => println!("{:<20} failed: {}", outcome.label, e),
        }
    }

    let file = File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    write_sweep_csv(file, &outcomes)
        .with_context(|| format!("writing sweep summary {}", output.display()))?;
    println!("\nSweep summary written to: {}", output.display());

    Ok(())
}
