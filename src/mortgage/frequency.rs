//! Payment frequencies and their period-count table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nominal vs actual payments per year for a frequency
///
/// The payment amount is the monthly payment scaled by `nominal / actual`.
/// Accelerated schedules pay 13 "months" worth across 26 or 52 payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCounts {
    pub nominal: u32,
    pub actual: u32,
}

impl PeriodCounts {
    pub fn ratio(&self) -> f64 {
        self.nominal as f64 / self.actual as f64
    }
}

/// Calendar spacing between payment dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Same day-of-month every month
    Monthly,
    /// Fixed number of days
    EveryDays(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    Monthly,
    BiWeekly,
    Weekly,
    AcceleratedBiWeekly,
    AcceleratedWeekly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 5] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::BiWeekly,
        PaymentFrequency::Weekly,
        PaymentFrequency::AcceleratedBiWeekly,
        PaymentFrequency::AcceleratedWeekly,
    ];

    pub fn period_counts(&self) -> PeriodCounts {
        let (nominal, actual) = match self {
            PaymentFrequency::Monthly => (12, 12),
            PaymentFrequency::BiWeekly => (12, 26),
            PaymentFrequency::Weekly => (12, 52),
            PaymentFrequency::AcceleratedBiWeekly => (13, 26),
            PaymentFrequency::AcceleratedWeekly => (13, 52),
        };
        PeriodCounts { nominal, actual }
    }

    pub fn is_accelerated(&self) -> bool {
        matches!(
            self,
            PaymentFrequency::AcceleratedBiWeekly | PaymentFrequency::AcceleratedWeekly
        )
    }

    /// Date spacing; acceleration changes the split, not the calendar
    pub fn cadence(&self) -> Cadence {
        match self {
            PaymentFrequency::Monthly => Cadence::Monthly,
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => Cadence::EveryDays(14),
            PaymentFrequency::Weekly | PaymentFrequency::AcceleratedWeekly => Cadence::EveryDays(7),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::AcceleratedBiWeekly => "accelerated bi-weekly",
            PaymentFrequency::AcceleratedWeekly => "accelerated weekly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "bi-weekly" | "biweekly" => Ok(PaymentFrequency::BiWeekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "accelerated-bi-weekly" | "accelerated-biweekly" => Ok(PaymentFrequency::AcceleratedBiWeekly),
            "accelerated-weekly" => Ok(PaymentFrequency::AcceleratedWeekly),
            other => Err(format!("Unknown payment frequency: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_table() {
        assert_eq!(PaymentFrequency::Monthly.period_counts(), PeriodCounts { nominal: 12, actual: 12 });
        assert_eq!(PaymentFrequency::Weekly.period_counts(), PeriodCounts { nominal: 12, actual: 52 });
        assert_eq!(
            PaymentFrequency::AcceleratedBiWeekly.period_counts(),
            PeriodCounts { nominal: 13, actual: 26 }
        );
        assert_eq!(PaymentFrequency::BiWeekly.period_counts().ratio(), 12.0 / 26.0);
    }

    #[test]
    fn test_acceleration_keeps_cadence() {
        assert_eq!(PaymentFrequency::AcceleratedWeekly.cadence(), PaymentFrequency::Weekly.cadence());
        assert_eq!(
            PaymentFrequency::AcceleratedBiWeekly.cadence(),
            PaymentFrequency::BiWeekly.cadence()
        );
        assert!(PaymentFrequency::AcceleratedWeekly.is_accelerated());
        assert!(!PaymentFrequency::Monthly.is_accelerated());
    }

    #[test]
    fn test_parse_round_trips_display() {
        for freq in PaymentFrequency::ALL {
            assert_eq!(freq.as_str().parse::<PaymentFrequency>(), Ok(freq));
        }
        assert_eq!("Accelerated_Weekly".parse::<PaymentFrequency>(), Ok(PaymentFrequency::AcceleratedWeekly));
        assert!("daily".parse::<PaymentFrequency>().is_err());
    }
}
