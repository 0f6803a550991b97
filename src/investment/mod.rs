//! Dividend-bearing investment ledger

mod account;
mod schedule;

pub use account::{InvestmentAccount, InvestmentTerms};
pub use schedule::{next_dividend_date, DividendFrequency};
