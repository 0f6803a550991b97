//! Recurring dividend issue schedule

use crate::calendar::{month_from_index, month_index, next_business_day};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often the holding pays a dividend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DividendFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl DividendFrequency {
    /// Calendar months between consecutive issue dates
    pub fn months_per_period(&self) -> i32 {
        match self {
            DividendFrequency::Monthly => 1,
            DividendFrequency::Quarterly => 3,
            DividendFrequency::SemiAnnual => 6,
            DividendFrequency::Annual => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DividendFrequency::Monthly => "monthly",
            DividendFrequency::Quarterly => "quarterly",
            DividendFrequency::SemiAnnual => "semi-annual",
            DividendFrequency::Annual => "annual",
        }
    }
}

impl fmt::Display for DividendFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DividendFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(DividendFrequency::Monthly),
            "quarterly" => Ok(DividendFrequency::Quarterly),
            "semi-annual" | "semi-annually" | "semiannual" => Ok(DividendFrequency::SemiAnnual),
            "annual" | "annually" => Ok(DividendFrequency::Annual),
            other => Err(format!("Unknown dividend frequency: {}", other)),
        }
    }
}

/// Next dividend issue date on or after `as_of`
///
/// Issue months are the anchor's month plus whole multiples of the period,
/// in both directions. Each issue keeps the anchor's day (clamped to the month
/// end) and is rolled forward off weekends before being compared with `as_of`,
/// so a Sunday issue is still "due" when queried on the following Monday.
pub fn next_dividend_date(
    anchor: NaiveDate,
    frequency: DividendFrequency,
    as_of: NaiveDate,
) -> NaiveDate {
    let step = frequency.months_per_period();
    let anchor_month = month_index(anchor);
    let elapsed = month_index(as_of) - anchor_month;

    // Start one period early: a weekend roll can push the prior issue past `as_of`
    let mut period = elapsed.div_euclid(step) - 1;
    loop {
        let issue = next_business_day(month_from_index(anchor_month + period * step, anchor.day()));
        if issue >= as_of {
            return issue;
        }
        period += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_schedule() {
        let anchor = date(2021, 10, 10);
        let freq = DividendFrequency::Monthly;
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 8, 9)), date(2021, 8, 10));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 8, 10)), date(2021, 8, 10));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 8, 11)), date(2021, 9, 10));
    }

    #[test]
    fn test_quarterly_schedule_rolls_weekend() {
        let anchor = date(2021, 10, 10); // Sunday
        let freq = DividendFrequency::Quarterly;
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 8, 9)), date(2021, 10, 11));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 10, 10)), date(2021, 10, 11));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 10, 11)), date(2021, 10, 11));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 11, 11)), date(2022, 1, 10));
    }

    #[test]
    fn test_semi_annual_and_annual_schedules() {
        let anchor = date(2021, 6, 15);
        assert_eq!(
            next_dividend_date(anchor, DividendFrequency::SemiAnnual, date(2021, 7, 1)),
            date(2021, 12, 15)
        );
        assert_eq!(
            next_dividend_date(anchor, DividendFrequency::SemiAnnual, date(2021, 1, 1)),
            date(2021, 6, 15)
        );
        // 2022-06-15 is a Wednesday
        assert_eq!(
            next_dividend_date(anchor, DividendFrequency::Annual, date(2021, 6, 16)),
            date(2022, 6, 15)
        );
    }

    #[test]
    fn test_month_end_anchor_clamps() {
        let anchor = date(2021, 1, 31);
        let freq = DividendFrequency::Monthly;
        // 2021-04-30 is a Friday
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 4, 2)), date(2021, 4, 30));
        // 2021-02-28 is a Sunday, rolls into March
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 2, 2)), date(2021, 3, 1));
        assert_eq!(next_dividend_date(anchor, freq, date(2021, 3, 2)), date(2021, 3, 31));
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!("Quarterly".parse::<DividendFrequency>(), Ok(DividendFrequency::Quarterly));
        assert_eq!("semi-annually".parse::<DividendFrequency>(), Ok(DividendFrequency::SemiAnnual));
        assert!("fortnightly".parse::<DividendFrequency>().is_err());
    }
}
