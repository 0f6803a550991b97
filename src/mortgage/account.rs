//! Mortgage and HELOC ledger

use super::credit::CreditLimitRule;
use super::frequency::PaymentFrequency;
use super::schedule::{heloc_due_date, payment_due_date};
use crate::error::{LedgerError, LedgerResult};
use crate::money::{is_non_negative, round_cents};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest lump-sum prepayment allowed, as a fraction of available equity
pub const LUMP_SUM_EQUITY_FRACTION: f64 = 0.10;

/// Construction parameters for a [`MortgageAccount`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    /// Outstanding principal
    pub principal: f64,

    /// Home equity the HELOC limit is measured against
    pub available_equity: f64,

    /// Remaining amortization in months
    pub amortization_months: u32,

    /// Nominal annual mortgage rate in percent, compounded semi-annually
    pub interest_rate_pct: f64,

    /// Annual HELOC rate in percent, charged monthly
    pub heloc_interest_rate_pct: f64,

    pub payment_frequency: PaymentFrequency,

    /// Most recent payment; anchors the payment calendar
    pub last_payment_date: NaiveDate,

    /// Explicit payment; computed from the amortization when absent
    #[serde(default)]
    pub payment_amount: Option<f64>,

    #[serde(default)]
    pub credit_limit_rule: CreditLimitRule,
}

/// Interest and principal portions of one regular payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentSplit {
    pub interest: f64,
    pub principal: f64,
}

/// Mortgage principal together with its re-advanceable HELOC
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortgageAccount {
    principal: f64,
    available_equity: f64,
    amortization_months: u32,
    interest_rate_pct: f64,
    heloc_interest_rate_pct: f64,
    payment_frequency: PaymentFrequency,
    last_payment_date: NaiveDate,
    payment_amount: f64,
    credit_limit_rule: CreditLimitRule,
    credit_limit: f64,
    credit_balance: f64,
}

impl MortgageAccount {
    pub fn new(terms: MortgageTerms) -> Self {
        let mut account = Self {
            principal: terms.principal,
            available_equity: terms.available_equity,
            amortization_months: terms.amortization_months,
            interest_rate_pct: terms.interest_rate_pct,
            heloc_interest_rate_pct: terms.heloc_interest_rate_pct,
            payment_frequency: terms.payment_frequency,
            last_payment_date: terms.last_payment_date,
            payment_amount: 0.0,
            credit_limit_rule: terms.credit_limit_rule,
            credit_limit: 0.0,
            credit_balance: 0.0,
        };
        account.payment_amount = match terms.payment_amount {
            Some(amount) => amount,
            None => account.compute_payment_amount(),
        };
        account.refresh_credit_limit();
        account
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn available_equity(&self) -> f64 {
        self.available_equity
    }

    pub fn amortization_months(&self) -> u32 {
        self.amortization_months
    }

    pub fn interest_rate_pct(&self) -> f64 {
        self.interest_rate_pct
    }

    pub fn heloc_interest_rate_pct(&self) -> f64 {
        self.heloc_interest_rate_pct
    }

    pub fn payment_frequency(&self) -> PaymentFrequency {
        self.payment_frequency
    }

    pub fn last_payment_date(&self) -> NaiveDate {
        self.last_payment_date
    }

    pub fn payment_amount(&self) -> f64 {
        self.payment_amount
    }

    pub fn credit_limit_rule(&self) -> CreditLimitRule {
        self.credit_limit_rule
    }

    pub fn credit_limit(&self) -> f64 {
        self.credit_limit
    }

    pub fn credit_balance(&self) -> f64 {
        self.credit_balance
    }

    /// Undrawn HELOC room, always derived from the current limit and balance
    pub fn credit_available(&self) -> f64 {
        round_cents(self.credit_limit - self.credit_balance)
    }

    /// Semi-annual nominal rate converted to an effective monthly rate
    fn monthly_interest_factor(&self) -> f64 {
        let semi_annual_rate = self.interest_rate_pct / 100.0 / 2.0;
        (1.0 + semi_annual_rate).powf(2.0).powf(1.0 / 12.0) - 1.0
    }

    /// Scheduled payment for the configured frequency, rounded to cents
    ///
    /// Canadian mortgages compound semi-annually, so the annuity uses the
    /// effective monthly rate: `P * i / (1 - (1 + i)^-n)`, then scales the
    /// monthly payment by the frequency's nominal/actual period ratio.
    pub fn compute_payment_amount(&self) -> f64 {
        let factor = self.monthly_interest_factor();
        let months = self.amortization_months as f64;
        let monthly_payment =
            self.principal * factor / (1.0 - (1.0 + factor).powf(-months));

        let counts = self.payment_frequency.period_counts();
        round_cents(monthly_payment * counts.nominal as f64 / counts.actual as f64)
    }

    /// Interest charged over one payment period on the current principal
    fn period_interest_factor(&self) -> f64 {
        let counts = self.payment_frequency.period_counts();
        if self.payment_frequency.is_accelerated() {
            let semi_annual_rate = self.interest_rate_pct / 100.0 / 2.0;
            (1.0 + semi_annual_rate).powf(2.0).powf(1.0 / counts.actual as f64) - 1.0
        } else {
            self.monthly_interest_factor() * counts.nominal as f64 / counts.actual as f64
        }
    }

    /// Split of the next regular payment into interest and principal
    pub fn compute_interest_and_principal_split(&self) -> PaymentSplit {
        let interest = round_cents(self.period_interest_factor() * self.principal);
        let principal = round_cents(self.payment_amount - interest);
        PaymentSplit { interest, principal }
    }

    /// Next payment date on or after `current`
    pub fn mortgage_payment_due_date(&self, current: NaiveDate) -> NaiveDate {
        payment_due_date(self.payment_frequency, self.last_payment_date, current)
    }

    /// First scheduled payment strictly after the last payment
    pub fn next_payment_date(&self) -> NaiveDate {
        let day_after = self.last_payment_date + chrono::Duration::days(1);
        payment_due_date(self.payment_frequency, self.last_payment_date, day_after)
    }

    pub fn heloc_payment_due_date(&self, current: NaiveDate) -> NaiveDate {
        heloc_due_date(current)
    }

    fn refresh_credit_limit(&mut self) {
        self.credit_limit = round_cents(
            self.credit_limit_rule
                .limit(self.available_equity, self.principal),
        );
    }

    fn reduce_principal(&mut self, amount: f64) {
        self.principal -= amount;
        self.refresh_credit_limit();
    }

    /// Apply one scheduled payment; the repaid principal becomes HELOC room
    ///
    /// The principal portion never exceeds the outstanding principal.
    pub fn make_regular_payment(&mut self) -> PaymentSplit {
        let mut split = self.compute_interest_and_principal_split();
        split.principal = split.principal.min(self.principal);
        self.reduce_principal(split.principal);
        split
    }

    /// Extra payment capped at the regular payment amount
    pub fn make_double_up_payment(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        if amount > self.payment_amount {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: "double-up payment exceeds the regular payment amount",
            });
        }
        self.reduce_principal(amount);
        Ok(self)
    }

    /// Prepayment capped at 10% of available equity
    pub fn make_lump_sum_payment(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        if amount > self.available_equity * LUMP_SUM_EQUITY_FRACTION {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: "lump-sum payment exceeds 10% of available equity",
            });
        }
        self.reduce_principal(amount);
        Ok(self)
    }

    pub fn draw_from_heloc(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        let available = self.credit_available();
        if amount > available {
            return Err(LedgerError::InsufficientCredit {
                requested: amount,
                available,
            });
        }
        self.credit_balance += amount;
        Ok(self)
    }

    pub fn make_heloc_payment(&mut self, amount: f64) -> LedgerResult<&mut Self> {
        if !is_non_negative(amount) {
            return Err(LedgerError::negative(amount));
        }
        if amount > self.credit_balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.credit_balance,
            });
        }
        self.credit_balance -= amount;
        Ok(self)
    }

    /// One month of HELOC interest on the drawn balance
    pub fn heloc_interest_due(&self) -> f64 {
        let monthly_rate = self.heloc_interest_rate_pct / 100.0 / 12.0;
        round_cents(monthly_rate * self.credit_balance)
    }

    /// Draw this month's interest onto the HELOC balance
    pub fn capitalize_heloc_interest(&mut self) -> LedgerResult<f64> {
        let interest = self.heloc_interest_due();
        let available = self.credit_available();
        if interest > available {
            return Err(LedgerError::InsufficientCredit {
                requested: interest,
                available,
            });
        }
        self.draw_from_heloc(interest)?;
        Ok(interest)
    }
}
