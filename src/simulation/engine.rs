//! Core daily simulation engine

use super::ledger::{LedgerRow, SimulationResult, Termination};
use super::state::SimulationState;
use super::tax::{refund_for_prior_year, TaxRates, TAX_REFUND_ELIGIBLE_MONTHS, TAX_REFUND_MONTH};
use crate::calendar::daily_range;
use crate::error::{LedgerResult, SimulationError};
use crate::investment::InvestmentAccount;
use crate::mortgage::MortgageAccount;
use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Dollar thresholds steering the strategy's daily decisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyThresholds {
    /// Capitalize HELOC interest only when this much credit is still available;
    /// otherwise the interest is paid from cash
    pub capitalize_above: f64,

    /// Minimum available credit before new room is drawn and invested
    pub reinvest_above: f64,

    /// Available credit above which `bonus_draw` is added to the draw
    pub bonus_above: f64,

    pub bonus_draw: f64,

    /// The run ends once principal falls to this amount
    pub payoff_threshold: f64,
}

impl Default for StrategyThresholds {
    fn default() -> Self {
        Self {
            capitalize_above: 2_000_000.0,
            reinvest_above: 2_000.0,
            bonus_above: 10_000.0,
            bonus_draw: 1_000.0,
            payoff_threshold: 5_000.0,
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// First simulated day
    pub start_date: NaiveDate,

    /// Number of days to simulate
    pub n_steps: u32,

    pub tax_rates: TaxRates,

    #[serde(default)]
    pub thresholds: StrategyThresholds,
}

/// Flows recorded while processing one day
#[derive(Debug, Clone, Copy, Default)]
struct DayFlows {
    mortgage_interest: f64,
    mortgage_principal: f64,
    prepayment: f64,
    heloc_interest: f64,
    dividends: f64,
    tax_refund: f64,
    event: bool,
}

/// Runs the Smith Manoeuvre over one mortgage and one investment account
pub struct SmithSimulator {
    mortgage: MortgageAccount,
    investment: InvestmentAccount,
    config: SimulationConfig,
}

impl SmithSimulator {
    /// Create a simulator that takes ownership of both accounts
    pub fn new(mortgage: MortgageAccount, investment: InvestmentAccount, config: SimulationConfig) -> Self {
        Self { mortgage, investment, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn mortgage(&self) -> &MortgageAccount {
        &self.mortgage
    }

    pub fn investment(&self) -> &InvestmentAccount {
        &self.investment
    }

    /// Run the simulation to the horizon or until the mortgage is paid off
    pub fn simulate(mut self) -> Result<SimulationResult, SimulationError> {
        let mut state = SimulationState::new();
        let mut rows = vec![LedgerRow::snapshot(
            self.config.start_date,
            &self.mortgage,
            &self.investment,
            state.cash,
        )];
        let mut termination = Termination::HorizonReached;

        for date in daily_range(self.config.start_date, self.config.n_steps) {
            let flows = self
                .simulate_day(date, &mut state, &rows)
                .map_err(|source| SimulationError { date, source })?;

            if !flows.event {
                continue;
            }

            if self.mortgage.principal() <= self.config.thresholds.payoff_threshold {
                info!(
                    "{}: principal {:.2} reached payoff threshold",
                    date,
                    self.mortgage.principal()
                );
                termination = Termination::PaidOff(date);
                break;
            }

            rows.push(self.record_row(date, &state, &flows));
        }

        info!(
            "Simulation finished: {} ledger rows, principal {:.2}, investments {:.2}",
            rows.len(),
            self.mortgage.principal(),
            self.investment.balance()
        );

        Ok(SimulationResult::new(rows, termination, self.mortgage, self.investment))
    }

    /// Apply every event falling on `date`, in order
    fn simulate_day(
        &mut self,
        date: NaiveDate,
        state: &mut SimulationState,
        rows: &[LedgerRow],
    ) -> LedgerResult<DayFlows> {
        let mut flows = DayFlows::default();

        if TAX_REFUND_ELIGIBLE_MONTHS.contains(&date.month()) {
            state.tax_refund_pending = true;
        }

        self.apply_mortgage_payment(date, state, &mut flows);
        self.assess_heloc_interest(date, state, &mut flows)?;
        self.collect_dividends(date, state, &mut flows)?;
        self.apply_tax_refund(date, state, rows, &mut flows)?;
        self.apply_double_up(state, &mut flows)?;
        self.reinvest_new_room(date, state, &mut flows)?;

        Ok(flows)
    }

    fn apply_mortgage_payment(&mut self, date: NaiveDate, state: &mut SimulationState, flows: &mut DayFlows) {
        if date != self.mortgage.mortgage_payment_due_date(date) {
            return;
        }
        let split = self.mortgage.make_regular_payment();
        debug!(
            "{}: mortgage payment, interest {:.2}, principal {:.2}",
            date, split.interest, split.principal
        );
        flows.mortgage_interest = split.interest;
        flows.mortgage_principal = split.principal;
        state.add_room(split.principal);
        flows.event = true;
    }

    fn assess_heloc_interest(
        &mut self,
        date: NaiveDate,
        state: &mut SimulationState,
        flows: &mut DayFlows,
    ) -> LedgerResult<()> {
        if date != self.mortgage.heloc_payment_due_date(date) {
            return Ok(());
        }
        if self.mortgage.credit_available() > self.config.thresholds.capitalize_above {
            flows.heloc_interest = self.mortgage.capitalize_heloc_interest()?;
            debug!("{}: capitalized HELOC interest {:.2}", date, flows.heloc_interest);
        } else {
            flows.heloc_interest = self.mortgage.heloc_interest_due();
            self.mortgage.make_heloc_payment(flows.heloc_interest)?;
            state.cash -= flows.heloc_interest;
            debug!("{}: paid HELOC interest {:.2} from cash", date, flows.heloc_interest);
        }
        flows.event = true;
        Ok(())
    }

    fn collect_dividends(
        &mut self,
        date: NaiveDate,
        state: &mut SimulationState,
        flows: &mut DayFlows,
    ) -> LedgerResult<()> {
        self.investment.issue_dividend(date);
        let accrued = self.investment.accrued_dividends();
        if accrued > 0.0 {
            self.investment.withdraw_dividends(accrued)?;
            debug!("{}: withdrew dividends {:.2}", date, accrued);
            flows.dividends += accrued;
            state.cash += accrued;
            flows.event = true;
        }
        Ok(())
    }

    fn apply_tax_refund(
        &mut self,
        date: NaiveDate,
        state: &mut SimulationState,
        rows: &[LedgerRow],
        flows: &mut DayFlows,
    ) -> LedgerResult<()> {
        if date.month() != TAX_REFUND_MONTH || !state.tax_refund_pending {
            return Ok(());
        }

        let refund = refund_for_prior_year(rows, date, &self.config.tax_rates);
        if refund > 0.0 {
            let amount = refund + state.surplus_cash();
            self.mortgage.make_lump_sum_payment(amount)?;
            state.add_room(amount);
            flows.prepayment += amount;
            info!("{}: tax refund {:.2}, lump-sum payment {:.2}", date, refund, amount);
        } else {
            // Settled against cash before the clamp below
            state.cash -= refund;
            warn!("{}: tax return {:.2} is not positive, no prepayment", date, refund);
        }
        flows.tax_refund = refund;
        state.tax_refund_pending = false;
        state.cash = state.cash.min(0.0);
        flows.event = true;
        Ok(())
    }

    fn apply_double_up(&mut self, state: &mut SimulationState, flows: &mut DayFlows) -> LedgerResult<()> {
        if state.cash <= 0.0 {
            return Ok(());
        }
        let amount = state.surplus_cash().min(self.mortgage.payment_amount());
        self.mortgage.make_double_up_payment(amount)?;
        state.add_room(amount);
        state.cash -= amount;
        flows.prepayment += amount;
        flows.event = true;
        Ok(())
    }

    fn reinvest_new_room(
        &mut self,
        date: NaiveDate,
        state: &mut SimulationState,
        flows: &mut DayFlows,
    ) -> LedgerResult<()> {
        let thresholds = &self.config.thresholds;
        let available = self.mortgage.credit_available();
        if available <= thresholds.reinvest_above || state.new_room <= 0.0 {
            return Ok(());
        }
        if available > thresholds.bonus_above {
            state.add_room(thresholds.bonus_draw);
        }
        let draw = state.take_room();
        self.mortgage.draw_from_heloc(draw)?;
        self.investment.buy(draw)?;
        debug!("{}: drew {:.2} from HELOC and invested", date, draw);
        flows.event = true;
        Ok(())
    }

    fn record_row(&self, date: NaiveDate, state: &SimulationState, flows: &DayFlows) -> LedgerRow {
        LedgerRow {
            date,
            mortgage_interest_paid: flows.mortgage_interest,
            mortgage_principal_paid: flows.mortgage_principal,
            prepayment: flows.prepayment,
            mortgage_principal_remaining: self.mortgage.principal(),
            heloc_interest_capitalized: flows.heloc_interest,
            heloc_credit_limit: self.mortgage.credit_limit(),
            heloc_credit_available: self.mortgage.credit_available(),
            heloc_credit_balance: self.mortgage.credit_balance(),
            investment_balance: self.investment.balance(),
            dividends_collected: flows.dividends,
            tax_refund: flows.tax_refund,
            cash_out_of_pocket: state.cash,
            event_occurred: flows.event,
        }
    }
}
