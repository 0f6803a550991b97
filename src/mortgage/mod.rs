//! Mortgage amortization with a re-advanceable HELOC
//!
//! The HELOC limit grows as mortgage principal is repaid; the simulation draws
//! that new room and invests it.

mod account;
mod credit;
mod frequency;
mod schedule;

pub use account::{MortgageAccount, MortgageTerms, PaymentSplit, LUMP_SUM_EQUITY_FRACTION};
pub use credit::{CreditLimitRule, DEFAULT_LOAN_TO_VALUE};
pub use frequency::{Cadence, PaymentFrequency, PeriodCounts};
pub use schedule::{heloc_due_date, payment_due_date};
