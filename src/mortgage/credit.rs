//! HELOC credit limit rules

use serde::{Deserialize, Serialize};

/// Loan-to-value cap applied to home equity by default
pub const DEFAULT_LOAN_TO_VALUE: f64 = 0.8;

/// How the re-advanceable HELOC limit is derived from equity and principal
///
/// Either way the limit rises one-for-one with principal repaid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreditLimitRule {
    /// `equity - principal`
    FullEquity,
    /// `ratio * equity - principal`
    LoanToValue(f64),
}

impl CreditLimitRule {
    /// Unrounded limit for the given equity and outstanding principal
    pub fn limit(&self, available_equity: f64, principal: f64) -> f64 {
        match self {
            CreditLimitRule::FullEquity => available_equity - principal,
            CreditLimitRule::LoanToValue(ratio) => available_equity * ratio - principal,
        }
    }
}

impl Default for CreditLimitRule {
    fn default() -> Self {
        CreditLimitRule::LoanToValue(DEFAULT_LOAN_TO_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_rules() {
        assert_eq!(CreditLimitRule::FullEquity.limit(625_000.0, 500_000.0), 125_000.0);
        assert_eq!(CreditLimitRule::default().limit(800_000.0, 500_000.0), 140_000.0);
        assert_eq!(CreditLimitRule::LoanToValue(0.65).limit(1_000_000.0, 600_000.0), 50_000.0);
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let rule: CreditLimitRule = serde_json::from_str("\"full-equity\"").unwrap();
        assert_eq!(rule, CreditLimitRule::FullEquity);
        let rule: CreditLimitRule = serde_json::from_str("{\"loan-to-value\": 0.75}").unwrap();
        assert_eq!(rule, CreditLimitRule::LoanToValue(0.75));
    }
}
