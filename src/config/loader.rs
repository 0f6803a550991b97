//! Load scenarios from JSON and sweep variations from CSV

use super::types::{Scenario, ScenarioVariation};
use crate::error::ConfigError;
use csv::Reader;
use std::fs;
use std::path::Path;

/// Scenario used by the CLI when no `--config` is given
pub const DEFAULT_SCENARIO_PATH: &str = "scenarios/default.json";

/// Load and validate a scenario file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_scenario_from_str(&text)
}

/// Parse and validate a scenario from JSON text
pub fn load_scenario_from_str(text: &str) -> Result<Scenario, ConfigError> {
    let scenario: Scenario = serde_json::from_str(text)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load the scenario at [`DEFAULT_SCENARIO_PATH`]
pub fn load_default_scenario() -> Result<Scenario, ConfigError> {
    load_scenario(DEFAULT_SCENARIO_PATH)
}

/// Load all variations from a sweep CSV file
pub fn load_variations<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioVariation>, ConfigError> {
    let mut reader = Reader::from_path(path)?;
    let mut variations = Vec::new();

    for result in reader.deserialize() {
        let variation: ScenarioVariation = result?;
        variations.push(variation);
    }

    Ok(variations)
}

/// Load variations from any reader (e.g., string buffer)
pub fn load_variations_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ScenarioVariation>, ConfigError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut variations = Vec::new();

    for result in csv_reader.deserialize() {
        let variation: ScenarioVariation = result?;
        variations.push(variation);
    }

    Ok(variations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::DividendFrequency;
    use crate::mortgage::{CreditLimitRule, PaymentFrequency};
    use chrono::NaiveDate;

    const MINIMAL: &str = r#"{
        "mortgage": {
            "principal": 486888.03,
            "available_equity": 795000.0,
            "amortization_months": 329,
            "interest_rate_pct": 2.74,
            "heloc_interest_rate_pct": 2.95,
            "payment_frequency": "bi-weekly",
            "last_payment_date": "2021-08-10"
        },
        "investment": {
            "dividend_yield_pct": 4.45,
            "dividend_frequency": "monthly",
            "dividend_issue_date": "2021-08-15"
        },
        "simulation": {
            "start_date": "2021-08-17",
            "n_steps": 60,
            "marginal_tax_rate_pct": 40.5,
            "dividend_tax_rate_pct": 14.4802
        }
    }"#;

    #[test]
    fn test_minimal_scenario_takes_defaults() {
        let scenario = load_scenario_from_str(MINIMAL).unwrap();
        assert_eq!(scenario.mortgage.payment_frequency, PaymentFrequency::BiWeekly);
        assert_eq!(scenario.mortgage.payment_amount, None);
        assert_eq!(scenario.mortgage.credit_limit_rule, CreditLimitRule::LoanToValue(0.8));
        assert_eq!(scenario.investment.balance, 0.0);
        assert_eq!(scenario.investment.dividend_frequency, DividendFrequency::Monthly);
        assert_eq!(scenario.initial_heloc_draw, 0.0);
        assert_eq!(scenario.simulation.thresholds.reinvest_above, 2_000.0);
        assert_eq!(
            scenario.simulation.start_date,
            NaiveDate::from_ymd_opt(2021, 8, 17).unwrap()
        );
    }

    #[test]
    fn test_default_scenario_file() {
        let scenario = load_default_scenario().expect("Failed to load default scenario");
        assert_eq!(scenario.mortgage.payment_amount, Some(1_100.0));
        assert_eq!(scenario.initial_heloc_draw, 140_000.0);
        assert_eq!(scenario.simulation.n_steps, 3_650);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let negative = MINIMAL.replace("486888.03", "-1.0");
        assert!(matches!(
            load_scenario_from_str(&negative),
            Err(ConfigError::Invalid(_))
        ));

        let bad_frequency = MINIMAL.replace("\"bi-weekly\"", "\"fortnightly\"");
        assert!(matches!(
            load_scenario_from_str(&bad_frequency),
            Err(ConfigError::Json(_))
        ));

        let mut scenario = load_scenario_from_str(MINIMAL).unwrap();
        scenario.simulation.thresholds.payoff_threshold = -1.0;
        assert!(matches!(scenario.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_scenario("scenarios/does_not_exist.json").unwrap_err();
        assert!(err.to_string().contains("does_not_exist.json"));
    }

    #[test]
    fn test_load_variations_from_reader() {
        let data = "\
label,marginal_tax_rate_pct,dividend_tax_rate_pct,dividend_yield_pct,heloc_interest_rate_pct,payment_amount,initial_heloc_draw,n_steps
base,,,,,,,
high-rate,,,,4.95,,,
short,45.0,20.0,5.0,,1200.0,100000.0,365
";
        let variations = load_variations_from_reader(data.as_bytes()).unwrap();
        assert_eq!(variations.len(), 3);
        assert_eq!(variations[0], ScenarioVariation { label: "base".to_string(), ..Default::default() });
        assert_eq!(variations[1].heloc_interest_rate_pct, Some(4.95));
        assert_eq!(variations[1].n_steps, None);
        assert_eq!(variations[2].marginal_tax_rate_pct, Some(45.0));
        assert_eq!(variations[2].n_steps, Some(365));
    }

    #[test]
    fn test_variation_overrides_only_given_fields() {
        let base = load_scenario_from_str(MINIMAL).unwrap();
        let variation = ScenarioVariation {
            label: "levered".to_string(),
            heloc_interest_rate_pct: Some(4.0),
            initial_heloc_draw: Some(50_000.0),
            ..Default::default()
        };
        let varied = base.with_variation(&variation);
        assert_eq!(varied.mortgage.heloc_interest_rate_pct, 4.0);
        assert_eq!(varied.initial_heloc_draw, 50_000.0);
        assert_eq!(varied.mortgage.principal, base.mortgage.principal);
        assert_eq!(varied.simulation, base.simulation);
    }
}
