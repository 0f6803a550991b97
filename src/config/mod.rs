//! Scenario inputs: JSON scenario files and CSV parameter sweeps

mod loader;
mod types;

pub use loader::{
    load_default_scenario, load_scenario, load_scenario_from_str, load_variations,
    load_variations_from_reader, DEFAULT_SCENARIO_PATH,
};
pub use types::{Scenario, ScenarioVariation, SimulationSettings};
