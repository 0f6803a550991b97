//! Scenario runner for single runs and parallel parameter sweeps
//!
//! Holds a validated base scenario and builds fresh accounts for every run,
//! so sweeps can execute variations independently across threads.

use crate::config::{load_scenario, Scenario, ScenarioVariation};
use crate::error::{ConfigError, ScenarioError};
use crate::investment::InvestmentAccount;
use crate::mortgage::MortgageAccount;
use crate::simulation::{SimulationResult, SimulationSummary, SmithSimulator};
use chrono::NaiveDate;
use csv::Writer;
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Pre-validated scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_path("scenarios/default.json")?;
/// let result = runner.run()?;
/// println!("{:?}", result.summary());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: Scenario,
}

impl ScenarioRunner {
    pub fn new(base: Scenario) -> Self {
        Self { base }
    }

    /// Create runner by loading a scenario file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self {
            base: load_scenario(path)?,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.base
    }

    /// Get mutable reference to the base scenario for customization
    pub fn scenario_mut(&mut self) -> &mut Scenario {
        &mut self.base
    }

    /// Open both accounts and invest the opening HELOC draw
    pub fn build(scenario: &Scenario) -> Result<SmithSimulator, ConfigError> {
        scenario.validate()?;

        let mut mortgage = MortgageAccount::new(scenario.mortgage.clone());
        let mut investment = InvestmentAccount::new(scenario.investment.clone());
        if scenario.initial_heloc_draw > 0.0 {
            mortgage.draw_from_heloc(scenario.initial_heloc_draw)?;
            investment.buy(scenario.initial_heloc_draw)?;
        }

        Ok(SmithSimulator::new(
            mortgage,
            investment,
            scenario.simulation.to_config(),
        ))
    }

    /// Run the base scenario
    pub fn run(&self) -> Result<SimulationResult, ScenarioError> {
        run_scenario(&self.base)
    }

    /// Run the base scenario with a different number of days
    pub fn run_for(&self, n_steps: u32) -> Result<SimulationResult, ScenarioError> {
        let mut scenario = self.base.clone();
        scenario.simulation.n_steps = n_steps;
        run_scenario(&scenario)
    }

    /// Run every variation of the base scenario in parallel
    ///
    /// Outcomes keep the input order; a failed variation does not stop the others.
    pub fn run_sweep(&self, variations: &[ScenarioVariation]) -> Vec<SweepOutcome> {
        let outcomes: Vec<SweepOutcome> = variations
            .par_iter()
            .map(|variation| SweepOutcome {
                label: variation.label.clone(),
                summary: run_scenario(&self.base.with_variation(variation))
                    .map(|result| result.summary()),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.summary.is_err()).count();
        info!("Sweep complete: {} variations, {} failed", outcomes.len(), failed);
        outcomes
    }
}

fn run_scenario(scenario: &Scenario) -> Result<SimulationResult, ScenarioError> {
    let simulator = ScenarioRunner::build(scenario)?;
    Ok(simulator.simulate()?)
}

/// Result of one sweep variation
#[derive(Debug)]
pub struct SweepOutcome {
    pub label: String,
    pub summary: Result<SimulationSummary, ScenarioError>,
}

/// One CSV line of sweep output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub label: String,
    pub error: Option<String>,
    pub paid_off: Option<NaiveDate>,
    pub ledger_rows: Option<u32>,
    pub total_mortgage_interest: Option<f64>,
    pub total_prepayments: Option<f64>,
    pub total_heloc_interest: Option<f64>,
    pub total_dividends: Option<f64>,
    pub total_tax_refunds: Option<f64>,
    pub max_out_of_pocket: Option<f64>,
    pub final_principal: Option<f64>,
    pub final_heloc_balance: Option<f64>,
    pub final_investment_balance: Option<f64>,
}

impl From<&SweepOutcome> for SweepRow {
    fn from(outcome: &SweepOutcome) -> Self {
        match &outcome.summary {
            Ok(s) => SweepRow {
                label: outcome.label.clone(),
                error: None,
                paid_off: s.paid_off,
                ledger_rows: Some(s.ledger_rows),
                total_mortgage_interest: Some(s.total_mortgage_interest),
                total_prepayments: Some(s.total_prepayments),
                total_heloc_interest: Some(s.total_heloc_interest),
                total_dividends: Some(s.total_dividends),
                total_tax_refunds: Some(s.total_tax_refunds),
                max_out_of_pocket: Some(s.max_out_of_pocket),
                final_principal: Some(s.final_principal),
                final_heloc_balance: Some(s.final_heloc_balance),
                final_investment_balance: Some(s.final_investment_balance),
            },
            Err(e) => SweepRow {
                label: outcome.label.clone(),
                error: Some(e.to_string()),
                paid_off: None,
                ledger_rows: None,
                total_mortgage_interest: None,
                total_prepayments: None,
                total_heloc_interest: None,
                total_dividends: None,
                total_tax_refunds: None,
                max_out_of_pocket: None,
                final_principal: None,
                final_heloc_balance: None,
                final_investment_balance: None,
            },
        }
    }
}

/// Write one summary line per sweep outcome
pub fn write_sweep_csv<W: Write>(writer: W, outcomes: &[SweepOutcome]) -> Result<(), csv::Error> {
    let mut csv_writer = Writer::from_writer(writer);
    for outcome in outcomes {
        csv_writer.serialize(SweepRow::from(outcome))?;
    }
    csv_writer.flush()?;
    Ok(())
}
