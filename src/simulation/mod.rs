//! Day-by-day Smith Manoeuvre simulation
//!
//! Each simulated day the engine checks the mortgage, HELOC, dividend and tax
//! calendars, applies whichever events fall due, reinvests the new HELOC room
//! and records a ledger row for days on which anything changed.

mod engine;
pub mod export;
mod ledger;
mod state;
mod tax;

pub use engine::{SimulationConfig, SmithSimulator, StrategyThresholds};
pub use ledger::{LedgerRow, SimulationResult, SimulationSummary, Termination};
pub use state::SimulationState;
pub use tax::{
    tax_refund, tax_year_totals, TaxRates, TaxYearTotals, DIVIDEND_GROSS_UP,
    TAX_REFUND_ELIGIBLE_MONTHS, TAX_REFUND_MONTH,
};
