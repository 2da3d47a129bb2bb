//! Scenario composer: per-year care cost and contractual offset series
//!
//! Cost for year `t` is built in a fixed order: growth, episode overlay,
//! cost reduction, then the buffer as the last multiplier. The buffer never
//! compounds with cost growth.

use serde::{Deserialize, Serialize};

use super::numeric::compound;
use crate::household::{EpisodeStructure, ScenarioInput};

/// Cost and offset series for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSchedule {
    /// Number of simulated years
    pub horizon_years: u32,

    /// Today's annual cost inflated to the scenario start
    pub base_cost: f64,

    /// Gross cost per year, index 0 = first scenario year
    pub costs: Vec<f64>,

    /// Contractual offset per year
    pub offsets: Vec<f64>,

    /// Number of care episodes running in each year (0, 1 or 2)
    pub active_episodes: Vec<u8>,
}

impl CostSchedule {
    pub fn is_empty(&self) -> bool {
        self.horizon_years == 0
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.iter().sum()
    }

    pub fn total_offset(&self) -> f64 {
        self.offsets.iter().sum()
    }
}

/// Combined timeline length covering every episode
///
/// Saturates at `u32::MAX`; validated inputs stay far below it.
pub fn horizon_years(input: &ScenarioInput) -> u32 {
    match input.episode_structure {
        EpisodeStructure::One => input.duration_years,
        EpisodeStructure::Two => input
            .gap_years
            .checked_add(input.duration_years)
            .unwrap_or(u32::MAX),
    }
}

/// Today's cost pre-inflated to the scenario start
pub fn base_cost(annual_cost_today: f64, cost_growth_rate: f64, years_to_start: u32) -> f64 {
    annual_cost_today * compound(cost_growth_rate, years_to_start)
}

/// Build the cost and offset series for a scenario
pub fn compose(input: &ScenarioInput) -> CostSchedule {
    let horizon = horizon_years(input);
    let base = base_cost(input.annual_cost_today, input.cost_growth_rate, input.years_to_start);
    let buffer_multiplier = 1.0 + input.buffer_rate;

    let mut costs = Vec::with_capacity(horizon as usize);
    let mut offsets = Vec::with_capacity(horizon as usize);
    let mut active_episodes = Vec::with_capacity(horizon as usize);

    for t in 0..horizon {
        // Both episodes sit on the same absolute timeline, so they share exponent t
        let grown = base * compound(input.cost_growth_rate, t);

        let first_active = t < input.duration_years;
        let second_active = input.episode_structure == EpisodeStructure::Two
            && t >= input.gap_years
            && t - input.gap_years < input.duration_years;

        let episode1 = if first_active { grown } else { 0.0 };
        let episode2 = if second_active { grown } else { 0.0 };

        let cost = (episode1 + episode2) * input.cost_reduction_factor * buffer_multiplier;
        costs.push(cost);

        offsets.push(contract_offset(input, t));
        active_episodes.push(first_active as u8 + second_active as u8);
    }

    CostSchedule {
        horizon_years: horizon,
        base_cost: base,
        costs,
        offsets,
        active_episodes,
    }
}

/// Fixed nominal benefit for year `t`; never grown with cost inflation
fn contract_offset(input: &ScenarioInput, t: u32) -> f64 {
    if input.has_contract && t < input.contract_benefit_years {
        input.annual_contract_benefit
    } else {
        0.0
    }
}
