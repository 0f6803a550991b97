//! Smith Manoeuvre simulator
//!
//! This library provides:
//! - A mortgage ledger with a re-advanceable HELOC and Canadian semi-annual compounding
//! - An investment ledger with business-day dividend schedules
//! - A day-by-day engine that reinvests repaid principal and applies tax refunds
//! - JSON scenarios, CSV parameter sweeps and CSV ledger export

pub mod calendar;
pub mod config;
pub mod error;
pub mod investment;
pub mod money;
pub mod mortgage;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use config::{Scenario, ScenarioVariation};
pub use error::{ConfigError, LedgerError, ScenarioError, SimulationError};
pub use investment::{DividendFrequency, InvestmentAccount, InvestmentTerms};
pub use mortgage::{CreditLimitRule, MortgageAccount, MortgageTerms, PaymentFrequency};
pub use scenario::ScenarioRunner;
pub use simulation::{LedgerRow, SimulationConfig, SimulationResult, SmithSimulator};
