//! Stress test engine: validation, accumulation, scenario composition and depletion

use serde::{Deserialize, Serialize};

use super::accumulation::{accumulation_schedule, AccumulationRow};
use super::composer::{compose, CostSchedule};
use super::coverage::CoverageSummary;
use super::ledger::DepletionResult;
use super::simulator::simulate;
use crate::assumptions::Assumptions;
use crate::error::InputError;
use crate::household::Household;

/// Configuration for a stress test run
#[derive(Debug, Clone)]
pub struct StressTestConfig {
    /// Keep the pre-scenario accumulation rows in the result
    pub detailed_output: bool,

    /// Clamp committed values into their ranges before validating
    pub normalize_inputs: bool,
}

impl Default for StressTestConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
            normalize_inputs: false,
        }
    }
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestResult {
    pub household_id: u32,

    /// Inputs the run actually used (after normalization, if enabled)
    pub household: Household,

    pub years_to_start: u32,

    /// Projected pool at the scenario start
    pub pool_at_start: f64,

    /// Pre-scenario accumulation rows (empty unless detailed output is on)
    pub accumulation: Vec<AccumulationRow>,

    pub schedule: CostSchedule,

    pub depletion: DepletionResult,

    pub coverage: CoverageSummary,
}

/// Main stress test engine
pub struct StressTestEngine {
    assumptions: Assumptions,
    config: StressTestConfig,
}

impl StressTestEngine {
    /// Create a new engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: StressTestConfig) -> Self {
        Self { assumptions, config }
    }

    /// Run the full stress test for one household
    ///
    /// Out-of-domain inputs are rejected before any computation. A depleted
    /// pool is a normal result, reported through the ledger.
    pub fn run(&self, household: &Household) -> Result<StressTestResult, InputError> {
        let household = if self.config.normalize_inputs {
            self.assumptions.limits.normalize(household)
        } else {
            household.clone()
        };
        self.assumptions.limits.validate(&household)?;

        let projection = household.projection_input();
        let scenario = household.scenario_input();

        let pool_at_start = projection.project();
        let accumulation = if self.config.detailed_output {
            accumulation_schedule(&projection)
        } else {
            Vec::new()
        };

        let schedule = compose(&scenario);
        let depletion = simulate(
            pool_at_start,
            &schedule.costs,
            &schedule.offsets,
            household.net_return_rate,
        );
        let coverage = CoverageSummary::from_schedule(&schedule, pool_at_start, household.buffer_rate);

        log::debug!(
            "Household {}: {} years to start, pool {:.2}, horizon {} years, shortfall year {:?}",
            household.household_id,
            projection.years_to_start,
            pool_at_start,
            schedule.horizon_years,
            depletion.first_shortfall_year,
        );

        Ok(StressTestResult {
            household_id: household.household_id,
            years_to_start: projection.years_to_start,
            household,
            pool_at_start,
            accumulation,
            schedule,
            depletion,
            coverage,
        })
    }
}
