//! Mortgage and HELOC due dates

use super::frequency::{Cadence, PaymentFrequency};
use crate::calendar::{add_months, last_day_of_month, month_index};
use chrono::{Duration, NaiveDate};

/// First scheduled payment date on or after `current`
///
/// Payments step from `last_payment` by the frequency's cadence; when
/// `current` is on or before `last_payment` that date itself is returned.
pub fn payment_due_date(
    frequency: PaymentFrequency,
    last_payment: NaiveDate,
    current: NaiveDate,
) -> NaiveDate {
    if current <= last_payment {
        return last_payment;
    }

    match frequency.cadence() {
        Cadence::EveryDays(step) => {
            let elapsed = (current - last_payment).num_days();
            let periods = (elapsed + step - 1) / step;
            last_payment + Duration::days(periods * step)
        }
        Cadence::Monthly => {
            // The clamped day can only fall short of `current` in its own month
            let mut months = (month_index(current) - month_index(last_payment) - 1).max(0);
            loop {
                let due = add_months(last_payment, months);
                if due >= current {
                    return due;
                }
                months += 1;
            }
        }
    }
}

/// HELOC interest is assessed on the last day of every month
pub fn heloc_due_date(current: NaiveDate) -> NaiveDate {
    last_day_of_month(current)
}
