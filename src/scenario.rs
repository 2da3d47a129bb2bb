//! Scenario runner for batches and single-lever sensitivity sweeps
//!
//! Holds the assumptions once, then runs many households or many variants of
//! one household. Runs are independent, so batches go through rayon.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::projection::{StressTestConfig, StressTestEngine, StressTestResult};
use crate::{Assumptions, Household};

/// Input a sensitivity sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lever {
    NetReturnRate,
    BufferRate,
    CostGrowthRate,
    AnnualContribution,
    CostReductionFactor,
}

impl Lever {
    /// Copy of `household` with this lever set to `value`
    pub fn apply(&self, household: &Household, value: f64) -> Household {
        let mut out = household.clone();
        match self {
            Lever::NetReturnRate => out.net_return_rate = value,
            Lever::BufferRate => out.buffer_rate = value,
            Lever::CostGrowthRate => out.cost_growth_rate = value,
            Lever::AnnualContribution => out.annual_contribution = value,
            Lever::CostReductionFactor => out.cost_reduction_factor = value,
        }
        out
    }
}

/// Outcome of one sweep value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub value: f64,
    pub pool_at_start: f64,
    pub first_shortfall_year: Option<u32>,
    pub years_fully_covered: u32,
    pub ending_balance: f64,
    pub gap: f64,
}

impl SensitivityPoint {
    fn from_result(value: f64, result: &StressTestResult) -> Self {
        Self {
            value,
            pool_at_start: result.pool_at_start,
            first_shortfall_year: result.depletion.first_shortfall_year,
            years_fully_covered: result.depletion.years_fully_covered,
            ending_balance: result.depletion.ending_balance,
            gap: result.coverage.gap,
        }
    }
}

/// Pre-loaded scenario runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the built-in assumptions
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::default_planning(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    fn engine(&self, config: StressTestConfig) -> StressTestEngine {
        StressTestEngine::new(self.assumptions.clone(), config)
    }

    /// Run a single household
    pub fn run(&self, household: &Household, config: StressTestConfig) -> Result<StressTestResult, InputError> {
        self.engine(config).run(household)
    }

    /// Run many households in parallel, preserving input order
    pub fn run_batch(
        &self,
        households: &[Household],
        config: StressTestConfig,
    ) -> Vec<Result<StressTestResult, InputError>> {
        log::info!("Running {} households", households.len());
        let engine = self.engine(config);
        households.par_iter().map(|h| engine.run(h)).collect()
    }

    /// Vary one lever across `values`, keeping everything else fixed
    pub fn run_sensitivity(
        &self,
        household: &Household,
        lever: Lever,
        values: &[f64],
    ) -> Result<Vec<SensitivityPoint>, InputError> {
        let engine = self.engine(StressTestConfig {
            detailed_output: false,
            ..StressTestConfig::default()
        });

        values
            .par_iter()
            .map(|&value| {
                let variant = lever.apply(household, value);
                engine
                    .run(&variant)
                    .map(|result| SensitivityPoint::from_result(value, &result))
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household() -> Household {
        Household {
            current_age: Some(70),
            start_age: 85,
            current_pool: 400_000.0,
            annual_contribution: 40_000.0,
            contribution_years: 10,
            ..Household::default()
        }
    }

    #[test]
    fn test_batch_preserves_order_and_reports_errors() {
        let runner = ScenarioRunner::new();
        let households = vec![
            Household { household_id: 1, ..household() },
            Household {
                household_id: 2,
                buffer_rate: 0.9,
                ..household()
            },
            Household { household_id: 3, ..household() },
        ];

        let results = runner.run_batch(&households, StressTestConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().household_id, 1);
        assert_eq!(results[1].as_ref().unwrap_err().field(), "buffer_rate");
        assert_eq!(results[2].as_ref().unwrap().household_id, 3);
    }

    #[test]
    fn test_higher_return_never_lowers_pool() {
        let runner = ScenarioRunner::new();
        let points = runner
            .run_sensitivity(&household(), Lever::NetReturnRate, &[0.0, 0.02, 0.04, 0.06, 0.08])
            .unwrap();

        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(pair[1].pool_at_start >= pair[0].pool_at_start);
            assert!(pair[1].years_fully_covered >= pair[0].years_fully_covered);
        }
    }

    #[test]
    fn test_higher_buffer_never_shrinks_gap() {
        let runner = ScenarioRunner::new();
        let points = runner
            .run_sensitivity(&household(), Lever::BufferRate, &[0.0, 0.1, 0.2, 0.3])
            .unwrap();

        for pair in points.windows(2) {
            assert!(pair[1].gap >= pair[0].gap);
            assert_eq!(pair[1].pool_at_start, pair[0].pool_at_start);
        }
    }

    #[test]
    fn test_sweep_rejects_out_of_range_value() {
        let runner = ScenarioRunner::new();
        let err = runner
            .run_sensitivity(&household(), Lever::CostReductionFactor, &[0.5, 1.5])
            .unwrap_err();
        assert_eq!(err.field(), "cost_reduction_factor");
    }
}
