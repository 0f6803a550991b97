//! Scenario data structures

use crate::error::ConfigError;
use crate::investment::InvestmentTerms;
use crate::mortgage::{CreditLimitRule, MortgageTerms};
use crate::simulation::{SimulationConfig, StrategyThresholds, TaxRates};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Run parameters as written in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub start_date: NaiveDate,
    pub n_steps: u32,
    pub marginal_tax_rate_pct: f64,
    pub dividend_tax_rate_pct: f64,
    #[serde(default)]
    pub thresholds: StrategyThresholds,
}

impl SimulationSettings {
    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            start_date: self.start_date,
            n_steps: self.n_steps,
            tax_rates: TaxRates {
                marginal_rate_pct: self.marginal_tax_rate_pct,
                dividend_rate_pct: self.dividend_tax_rate_pct,
            },
            thresholds: self.thresholds,
        }
    }
}

/// Complete description of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub mortgage: MortgageTerms,
    pub investment: InvestmentTerms,
    pub simulation: SimulationSettings,

    /// Drawn from the HELOC and invested before the first simulated day
    #[serde(default)]
    pub initial_heloc_draw: f64,
}

impl Scenario {
    /// Reject inputs the ledgers cannot start from
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.mortgage;
        check_non_negative("mortgage.principal", m.principal)?;
        check_non_negative("mortgage.available_equity", m.available_equity)?;
        check_non_negative("mortgage.interest_rate_pct", m.interest_rate_pct)?;
        check_non_negative("mortgage.heloc_interest_rate_pct", m.heloc_interest_rate_pct)?;
        if let Some(amount) = m.payment_amount {
            check_non_negative("mortgage.payment_amount", amount)?;
        } else if m.amortization_months == 0 {
            return Err(ConfigError::Invalid(
                "mortgage.amortization_months must be positive when no payment_amount is given"
                    .to_string(),
            ));
        }
        if let CreditLimitRule::LoanToValue(ratio) = m.credit_limit_rule {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "loan-to-value ratio must be in (0, 1], got {}",
                    ratio
                )));
            }
        }

        check_non_negative("investment.balance", self.investment.balance)?;
        check_non_negative("investment.dividend_yield_pct", self.investment.dividend_yield_pct)?;
        check_non_negative("initial_heloc_draw", self.initial_heloc_draw)?;
        check_non_negative(
            "simulation.thresholds.payoff_threshold",
            self.simulation.thresholds.payoff_threshold,
        )?;
        check_finite("simulation.marginal_tax_rate_pct", self.simulation.marginal_tax_rate_pct)?;
        check_finite("simulation.dividend_tax_rate_pct", self.simulation.dividend_tax_rate_pct)?;
        Ok(())
    }

    /// Copy of this scenario with a variation's overrides applied
    pub fn with_variation(&self, variation: &ScenarioVariation) -> Scenario {
        let mut scenario = self.clone();
        if let Some(rate) = variation.marginal_tax_rate_pct {
            scenario.simulation.marginal_tax_rate_pct = rate;
        }
        if let Some(rate) = variation.dividend_tax_rate_pct {
            scenario.simulation.dividend_tax_rate_pct = rate;
        }
        if let Some(yield_pct) = variation.dividend_yield_pct {
            scenario.investment.dividend_yield_pct = yield_pct;
        }
        if let Some(rate) = variation.heloc_interest_rate_pct {
            scenario.mortgage.heloc_interest_rate_pct = rate;
        }
        if let Some(amount) = variation.payment_amount {
            scenario.mortgage.payment_amount = Some(amount);
        }
        if let Some(draw) = variation.initial_heloc_draw {
            scenario.initial_heloc_draw = draw;
        }
        if let Some(n_steps) = variation.n_steps {
            scenario.simulation.n_steps = n_steps;
        }
        scenario
    }
}

/// One row of a sweep file; empty cells keep the base scenario's value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVariation {
    pub label: String,
    pub marginal_tax_rate_pct: Option<f64>,
    pub dividend_tax_rate_pct: Option<f64>,
    pub dividend_yield_pct: Option<f64>,
    pub heloc_interest_rate_pct: Option<f64>,
    pub payment_amount: Option<f64>,
    pub initial_heloc_draw: Option<f64>,
    pub n_steps: Option<u32>,
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be non-negative, got {}", field, value)))
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be a finite number", field)))
    }
}
