//! Investment account funded by HELOC draws

use super::schedule::{next_dividend_date, DividendFrequency};
use crate::error::{LedgerError, LedgerResult};
use crate::money::{is_non_negative, round_cents};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Construction parameters for an [`InvestmentAccount`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentTerms {
    /// Opening invested balance
    #[serde(default)]
    pub balance: f64,

    /// Annual dividend yield in percent (4.45 = 4.45%)
    pub dividend_yield_pct: f64,

    pub dividend_frequency: DividendFrequency,

    /// Any past or future issue date; fixes the schedule's day and phase
    pub dividend_issue_date: NaiveDate,
}

/// Invested capital plus dividends accrued but not yet withdrawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentAccount {
    balance: f64,
    dividend_yield_pct: f64,
    dividend_frequency: DividendFrequency,
    dividend_issue_date: NaiveDate,
    accrued_dividends: f64,
}

impl InvestmentAccount {
    pub fn new(terms: InvestmentTerms) -> Self {
        Self {
            balance: terms.balance,
            dividend_yield_pct: terms.dividend_yield_pct,
            dividend_frequency: terms.dividend_frequency,
            dividend_issue_date: terms.dividend_issue_date,
            accrued_dividends: 0.0,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn accrued_dividends(&self) -> f64 {
        self.accrued_dividends
    }

    pub fn dividend_yield_pct(&self) -> f64 {
        self.dividend_yield_pct
    }

    pub fn dividend_frequency(&self) -> DividendFrequency {
        self.dividend_frequency
    }

    pub fn buy(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        self.balance += amount;
        Ok(self)
    }

    pub fn sell(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(self)
    }

    /// Next dividend issue date on or after `as_of`
    pub fn next_dividend_date(&self, as_of: NaiveDate) -> NaiveDate {
        next_dividend_date(self.dividend_issue_date, self.dividend_frequency, as_of)
    }

    /// Accrue one dividend if `current_date` is an issue date
    ///
    /// The accrual always uses a monthly rate (yield / 12) whatever the issue
    /// frequency. Not idempotent: the caller must invoke it once per day.
    /// Returns the amount accrued (zero on non-issue days).
    pub fn issue_dividend(&mut self, current_date: NaiveDate) -> f64 {
        if current_date != self.next_dividend_date(current_date) {
            return 0.0;
        }
        let dividend = round_cents(self.balance * self.dividend_yield_pct / 100.0 / 12.0);
        self.accrued_dividends += dividend;
        dividend
    }

    pub fn withdraw_dividends(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        if amount > self.accrued_dividends {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.accrued_dividends,
            });
        }
        self.accrued_dividends -= amount;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(balance: f64) -> InvestmentAccount {
        InvestmentAccount::new(InvestmentTerms {
            balance,
            dividend_yield_pct: 10.0,
            dividend_frequency: DividendFrequency::Monthly,
            dividend_issue_date: date(2021, 10, 10),
        })
    }

    #[test]
    fn test_buy() {
        let mut investment = account(0.0);
        investment.buy(10_000.0).unwrap();
        assert_eq!(investment.balance(), 10_000.0);

        investment.buy(5_000.0).unwrap();
        assert_eq!(investment.balance(), 15_000.0);

        let err = investment.buy(-100.0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount { .. }));

        investment.buy(0.0).unwrap();
        assert_eq!(investment.balance(), 15_000.0);
    }

    #[test]
    fn test_sell() {
        let mut investment = account(10_000.0);
        investment.sell(5_000.0).unwrap().sell(1_000.0).unwrap();
        assert_eq!(investment.balance(), 4_000.0);

        assert!(matches!(
            investment.sell(-100.0),
            Err(LedgerError::InvalidAmount { .. })
        ));

        investment.sell(0.0).unwrap();
        assert_eq!(investment.balance(), 4_000.0);

        assert!(matches!(
            investment.sell(5_000.0),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(investment.balance(), 4_000.0);
    }

    #[test]
    fn test_issue_dividend() {
        let mut investment = account(120_000.0);

        assert_eq!(investment.issue_dividend(date(2021, 8, 9)), 0.0);
        assert_eq!(investment.accrued_dividends(), 0.0);

        assert_eq!(investment.issue_dividend(date(2021, 8, 10)), 1_000.0);
        assert_eq!(investment.accrued_dividends(), 1_000.0);

        investment.issue_dividend(date(2021, 8, 11));
        assert_eq!(investment.accrued_dividends(), 1_000.0);

        investment.issue_dividend(date(2021, 9, 10));
        assert_eq!(investment.accrued_dividends(), 2_000.0);

        // Sunday 10th rolled to Monday 11th
        investment.issue_dividend(date(2021, 10, 11));
        assert_eq!(investment.accrued_dividends(), 3_000.0);
    }

    #[test]
    fn test_quarterly_dividend_uses_monthly_rate() {
        let mut investment = InvestmentAccount::new(InvestmentTerms {
            balance: 120_000.0,
            dividend_yield_pct: 10.0,
            dividend_frequency: DividendFrequency::Quarterly,
            dividend_issue_date: date(2021, 10, 10),
        });
        investment.issue_dividend(date(2021, 9, 10));
        assert_eq!(investment.accrued_dividends(), 0.0);
        investment.issue_dividend(date(2021, 10, 11));
        assert_eq!(investment.accrued_dividends(), 1_000.0);
    }

    #[test]
    fn test_dividend_rounds_to_cents() {
        let mut investment = account(140_589.8);
        let dividend = investment.issue_dividend(date(2021, 9, 10));
        assert_abs_diff_eq!(dividend, 1_171.58, epsilon = 1e-9);
    }

    #[test]
    fn test_withdraw_dividends() {
        let mut investment = account(120_000.0);
        investment.issue_dividend(date(2021, 10, 11));

        investment.withdraw_dividends(10.0).unwrap();
        assert_eq!(investment.accrued_dividends(), 990.0);

        assert!(matches!(
            investment.withdraw_dividends(-100.0),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            investment.withdraw_dividends(10_000.0),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(investment.accrued_dividends(), 990.0);
    }
}
