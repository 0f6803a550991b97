//! Annual tax refund from deductible HELOC interest
//!
//! HELOC interest used to buy income-producing investments is deductible at
//! the marginal rate; eligible dividends are grossed up by 38% and taxed at
//! the dividend rate. The net is received as a refund in March.

use super::ledger::LedgerRow;
use crate::money::round_cents;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Eligible-dividend gross-up factor
pub const DIVIDEND_GROSS_UP: f64 = 1.38;

/// Refunds arrive in March
pub const TAX_REFUND_MONTH: u32 = 3;

/// Months in which a refund for the prior year becomes pending
pub const TAX_REFUND_ELIGIBLE_MONTHS: [u32; 2] = [1, 2];

/// Tax rates in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub marginal_rate_pct: f64,
    pub dividend_rate_pct: f64,
}

/// Deductible interest and taxable dividends recorded in one calendar year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TaxYearTotals {
    pub heloc_interest: f64,
    pub dividends: f64,
}

/// Sum HELOC interest and dividends over rows dated within `year`
pub fn tax_year_totals(rows: &[LedgerRow], year: i32) -> TaxYearTotals {
    let (start, end) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return TaxYearTotals::default(),
    };

    rows.iter()
        .filter(|row| row.date >= start && row.date <= end)
        .fold(TaxYearTotals::default(), |mut totals, row| {
            totals.heloc_interest += row.heloc_interest_capitalized;
            totals.dividends += row.dividends_collected;
            totals
        })
}

/// Net refund for a tax year, rounded to cents; negative when tax is owed
pub fn tax_refund(totals: &TaxYearTotals, rates: &TaxRates) -> f64 {
    let deduction = rates.marginal_rate_pct / 100.0 * totals.heloc_interest;
    let dividend_tax = totals.dividends * DIVIDEND_GROSS_UP * (rates.dividend_rate_pct / 100.0);
    round_cents(deduction - dividend_tax)
}

/// Refund due in March of `date`'s year, computed from the prior year's rows
pub(crate) fn refund_for_prior_year(rows: &[LedgerRow], date: NaiveDate, rates: &TaxRates) -> f64 {
    let totals = tax_year_totals(rows, date.year() - 1);
    tax_refund(&totals, rates)
}
