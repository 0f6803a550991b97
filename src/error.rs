//! Error types for ledger operations, simulation runs and scenario loading

use chrono::NaiveDate;
use thiserror::Error;

/// Validation failure raised by a mutating ledger operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("invalid amount {amount:.2}: {reason}")]
    InvalidAmount { amount: f64, reason: &'static str },

    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("insufficient credit: requested {requested:.2}, available {available:.2}")]
    InsufficientCredit { requested: f64, available: f64 },
}

impl LedgerError {
    pub(crate) fn negative(amount: f64) -> Self {
        LedgerError::InvalidAmount {
            amount,
            reason: "amount must be non-negative",
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// A scheduled operation failed inside a simulation run
#[derive(Debug, Clone, PartialEq, Error)]
#[error("simulation aborted on {date}: {source}")]
pub struct SimulationError {
    pub date: NaiveDate,
    #[source]
    pub source: LedgerError,
}

/// Failure to load or apply scenario inputs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid sweep file: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),

    #[error("scenario setup failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// Failure of a complete scenario run, from loading through simulation
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
