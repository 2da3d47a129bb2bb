//! Static coverage check: total out-of-pocket need against the projected pool
//!
//! Ignores growth during the scenario. The depletion ledger is the
//! year-by-year answer; this is the single-number headline.

use serde::{Deserialize, Serialize};

use super::composer::CostSchedule;
use super::numeric::floor_zero;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Sum of buffered care costs over the horizon
    pub total_cost: f64,
    /// Sum of contractual offsets over the horizon
    pub total_offset: f64,
    /// Sum of yearly out-of-pocket draws
    pub required_pool: f64,
    pub pool_at_start: f64,
    /// `max(0, required_pool - pool_at_start)`
    pub gap: f64,
    /// `1 + buffer_rate`, for display
    pub buffer_multiplier: f64,
}

impl CoverageSummary {
    pub fn from_schedule(schedule: &CostSchedule, pool_at_start: f64, buffer_rate: f64) -> Self {
        let required_pool: f64 = schedule
            .costs
            .iter()
            .zip(&schedule.offsets)
            .map(|(cost, offset)| floor_zero(cost - offset))
            .sum();

        Self {
            total_cost: schedule.total_cost(),
            total_offset: schedule.total_offset(),
            required_pool,
            pool_at_start,
            gap: floor_zero(required_pool - pool_at_start),
            buffer_multiplier: 1.0 + buffer_rate,
        }
    }

    pub fn is_covered(&self) -> bool {
        self.gap <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn schedule(costs: Vec<f64>, offsets: Vec<f64>) -> CostSchedule {
        CostSchedule {
            horizon_years: costs.len() as u32,
            base_cost: costs.first().copied().unwrap_or(0.0),
            active_episodes: vec![1; costs.len()],
            costs,
            offsets,
        }
    }

    #[test]
    fn test_gap_when_pool_is_short() {
        let s = schedule(vec![300_000.0; 5], vec![138_000.0, 138_000.0, 0.0, 0.0, 0.0]);
        let coverage = CoverageSummary::from_schedule(&s, 1_000_000.0, 0.18);

        assert_eq!(coverage.total_cost, 1_500_000.0);
        assert_eq!(coverage.total_offset, 276_000.0);
        assert_eq!(coverage.required_pool, 1_224_000.0);
        assert_eq!(coverage.gap, 224_000.0);
        assert_relative_eq!(coverage.buffer_multiplier, 1.18, epsilon = 1e-12);
        assert!(!coverage.is_covered());
    }

    #[test]
    fn test_excess_offset_does_not_reduce_other_years() {
        let s = schedule(vec![100_000.0, 100_000.0], vec![400_000.0, 0.0]);
        let coverage = CoverageSummary::from_schedule(&s, 100_000.0, 0.0);

        assert_eq!(coverage.required_pool, 100_000.0);
        assert!(coverage.is_covered());
    }
}
