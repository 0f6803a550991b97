//! Event log rows and run results

use crate::investment::InvestmentAccount;
use crate::mortgage::MortgageAccount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of one simulated day on which at least one event fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,

    // Mortgage flows
    pub mortgage_interest_paid: f64,
    pub mortgage_principal_paid: f64,
    /// Double-up and lump-sum principal applied this day
    pub prepayment: f64,
    pub mortgage_principal_remaining: f64,

    // HELOC
    /// Month-end HELOC interest, whether capitalized or paid from cash
    pub heloc_interest_capitalized: f64,
    pub heloc_credit_limit: f64,
    pub heloc_credit_available: f64,
    pub heloc_credit_balance: f64,

    // Investment and cash
    pub investment_balance: f64,
    pub dividends_collected: f64,
    /// Refund applied this day; negative when tax was owed
    pub tax_refund: f64,
    /// Running cash accumulator after the day's events
    pub cash_out_of_pocket: f64,

    pub event_occurred: bool,
}

impl LedgerRow {
    /// Row with zero flows and balances taken from the accounts
    pub fn snapshot(
        date: NaiveDate,
        mortgage: &MortgageAccount,
        investment: &InvestmentAccount,
        cash: f64,
    ) -> Self {
        Self {
            date,
            mortgage_interest_paid: 0.0,
            mortgage_principal_paid: 0.0,
            prepayment: 0.0,
            mortgage_principal_remaining: mortgage.principal(),
            heloc_interest_capitalized: 0.0,
            heloc_credit_limit: mortgage.credit_limit(),
            heloc_credit_available: mortgage.credit_available(),
            heloc_credit_balance: mortgage.credit_balance(),
            investment_balance: investment.balance(),
            dividends_collected: 0.0,
            tax_refund: 0.0,
            cash_out_of_pocket: cash,
            event_occurred: true,
        }
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Every requested day was simulated
    HorizonReached,
    /// Principal fell to the payoff threshold on this date
    PaidOff(NaiveDate),
}

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Ordered event log, opening snapshot first
    pub rows: Vec<LedgerRow>,

    pub termination: Termination,

    /// Accounts as they stood when the run ended
    pub mortgage: MortgageAccount,
    pub investment: InvestmentAccount,
}

impl SimulationResult {
    pub(crate) fn new(
        rows: Vec<LedgerRow>,
        termination: Termination,
        mortgage: MortgageAccount,
        investment: InvestmentAccount,
    ) -> Self {
        Self {
            rows: dedup_rows(rows),
            termination,
            mortgage,
            investment,
        }
    }

    pub fn final_row(&self) -> Option<&LedgerRow> {
        self.rows.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> SimulationSummary {
        let total_mortgage_interest: f64 = self.rows.iter().map(|r| r.mortgage_interest_paid).sum();
        let total_scheduled_principal: f64 = self.rows.iter().map(|r| r.mortgage_principal_paid).sum();
        let total_prepayments: f64 = self.rows.iter().map(|r| r.prepayment).sum();
        let total_heloc_interest: f64 = self.rows.iter().map(|r| r.heloc_interest_capitalized).sum();
        let total_dividends: f64 = self.rows.iter().map(|r| r.dividends_collected).sum();
        let total_tax_refunds: f64 = self.rows.iter().map(|r| r.tax_refund).sum();

        let max_out_of_pocket = self
            .rows
            .iter()
            .map(|r| -r.cash_out_of_pocket)
            .fold(0.0_f64, f64::max);

        SimulationSummary {
            ledger_rows: self.rows.len() as u32,
            total_mortgage_interest,
            total_scheduled_principal,
            total_prepayments,
            total_heloc_interest,
            total_dividends,
            total_tax_refunds,
            max_out_of_pocket,
            final_principal: self.mortgage.principal(),
            final_heloc_balance: self.mortgage.credit_balance(),
            final_investment_balance: self.investment.balance(),
            paid_off: match self.termination {
                Termination::PaidOff(date) => Some(date),
                Termination::HorizonReached => None,
            },
        }
    }
}

/// Summary statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub ledger_rows: u32,
    pub total_mortgage_interest: f64,
    pub total_scheduled_principal: f64,
    pub total_prepayments: f64,
    pub total_heloc_interest: f64,
    pub total_dividends: f64,
    pub total_tax_refunds: f64,
    pub max_out_of_pocket: f64,
    pub final_principal: f64,
    pub final_heloc_balance: f64,
    pub final_investment_balance: f64,
    pub paid_off: Option<NaiveDate>,
}

/// Drop rows identical to an earlier row, keeping first occurrences in order
fn dedup_rows(rows: Vec<LedgerRow>) -> Vec<LedgerRow> {
    let mut unique: Vec<LedgerRow> = Vec::with_capacity(rows.len());
    for row in rows {
        // Rows are date-ordered, so an identical row can only share the last date
        let duplicate = unique
            .iter()
            .rev()
            .take_while(|kept| kept.date == row.date)
            .any(|kept| *kept == row);
        if !duplicate {
            unique.push(row);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::{DividendFrequency, InvestmentTerms};
    use crate::mortgage::{CreditLimitRule, MortgageTerms, PaymentFrequency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn accounts() -> (MortgageAccount, InvestmentAccount) {
        let mortgage = MortgageAccount::new(MortgageTerms {
            principal: 400_000.0,
            available_equity: 600_000.0,
            amortization_months: 300,
            interest_rate_pct: 3.0,
            heloc_interest_rate_pct: 4.0,
            payment_frequency: PaymentFrequency::Monthly,
            last_payment_date: date(2021, 1, 1),
            payment_amount: None,
            credit_limit_rule: CreditLimitRule::FullEquity,
        });
        let investment = InvestmentAccount::new(InvestmentTerms {
            balance: 50_000.0,
            dividend_yield_pct: 5.0,
            dividend_frequency: DividendFrequency::Monthly,
            dividend_issue_date: date(2021, 1, 15),
        });
        (mortgage, investment)
    }

    #[test]
    fn test_snapshot_reads_accounts() {
        let (mortgage, investment) = accounts();
        let row = LedgerRow::snapshot(date(2021, 1, 4), &mortgage, &investment, -12.5);
        assert_eq!(row.mortgage_principal_remaining, 400_000.0);
        assert_eq!(row.heloc_credit_limit, 200_000.0);
        assert_eq!(row.heloc_credit_available, 200_000.0);
        assert_eq!(row.investment_balance, 50_000.0);
        assert_eq!(row.cash_out_of_pocket, -12.5);
        assert!(row.event_occurred);
    }

    #[test]
    fn test_identical_rows_are_suppressed() {
        let (mortgage, investment) = accounts();
        let first = LedgerRow::snapshot(date(2021, 1, 4), &mortgage, &investment, 0.0);
        let mut second = first.clone();
        second.date = date(2021, 1, 5);
        let rows = vec![first.clone(), first.clone(), second.clone(), second.clone()];

        let result = SimulationResult::new(rows, Termination::HorizonReached, mortgage, investment);
        assert_eq!(result.rows, vec![first, second]);
    }

    #[test]
    fn test_summary_totals() {
        let (mortgage, investment) = accounts();
        let opening = LedgerRow::snapshot(date(2021, 1, 4), &mortgage, &investment, 0.0);
        let mut payment_day = opening.clone();
        payment_day.date = date(2021, 2, 1);
        payment_day.mortgage_interest_paid = 990.0;
        payment_day.mortgage_principal_paid = 900.0;
        payment_day.cash_out_of_pocket = -300.0;
        let mut dividend_day = opening.clone();
        dividend_day.date = date(2021, 2, 15);
        dividend_day.dividends_collected = 208.33;
        dividend_day.prepayment = 108.33;
        dividend_day.cash_out_of_pocket = 0.0;

        let result = SimulationResult::new(
            vec![opening, payment_day, dividend_day],
            Termination::PaidOff(date(2021, 3, 1)),
            mortgage,
            investment,
        );
        let summary = result.summary();
        assert_eq!(summary.ledger_rows, 3);
        assert_eq!(summary.total_mortgage_interest, 990.0);
        assert_eq!(summary.total_scheduled_principal, 900.0);
        assert_eq!(summary.total_dividends, 208.33);
        assert_eq!(summary.total_prepayments, 108.33);
        assert_eq!(summary.max_out_of_pocket, 300.0);
        assert_eq!(summary.final_investment_balance, 50_000.0);
        assert_eq!(summary.paid_off, Some(date(2021, 3, 1)));
    }
}
