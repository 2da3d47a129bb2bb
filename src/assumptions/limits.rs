//! Input ranges: normalization of committed values and validation at the engine boundary

use crate::error::InputError;
use crate::household::Household;
use serde::{Deserialize, Serialize};

/// Highest cost inflation the engine accepts
pub const MAX_COST_GROWTH_RATE: f64 = 0.15;

/// Highest safety buffer the engine accepts
pub const MAX_BUFFER_RATE: f64 = 0.5;

/// Closed numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn clamp_u32(&self, value: u32) -> u32 {
        self.clamp(value as f64).round() as u32
    }

    fn clamp_u8(&self, value: u8) -> u8 {
        self.clamp(value as f64).round() as u8
    }

    fn check(&self, field: &'static str, value: f64) -> Result<(), InputError> {
        if !value.is_finite() {
            return Err(InputError::NotFinite { field, value });
        }
        if !self.contains(value) {
            return Err(InputError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Ranges for every wizard input
///
/// `normalize` uses the full ranges. `validate` only enforces the domain the
/// engine needs (non-negative amounts, rate caps), so a value the UI would
/// clamp may still be a valid engine input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    pub start_age: Bounds,
    pub current_pool: Bounds,
    pub annual_contribution: Bounds,
    pub contribution_years: Bounds,
    /// Upper bound is the net return cap
    pub net_return_rate: Bounds,
    pub annual_cost_today: Bounds,
    pub cost_growth_rate: Bounds,
    pub duration_years: Bounds,
    pub gap_years: Bounds,
    pub buffer_rate: Bounds,
    pub cost_reduction_factor: Bounds,
    pub annual_contract_benefit: Bounds,
    pub contract_benefit_years: Bounds,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            start_age: Bounds::new(40.0, 110.0),
            current_pool: Bounds::new(0.0, 10_000_000.0),
            annual_contribution: Bounds::new(0.0, 1_000_000.0),
            contribution_years: Bounds::new(0.0, 40.0),
            net_return_rate: Bounds::new(0.0, 0.08),
            annual_cost_today: Bounds::new(50_000.0, 600_000.0),
            cost_growth_rate: Bounds::new(0.0, MAX_COST_GROWTH_RATE),
            duration_years: Bounds::new(1.0, 20.0),
            gap_years: Bounds::new(0.0, 20.0),
            buffer_rate: Bounds::new(0.0, MAX_BUFFER_RATE),
            cost_reduction_factor: Bounds::new(0.0, 1.0),
            annual_contract_benefit: Bounds::new(0.0, 400_000.0),
            contract_benefit_years: Bounds::new(0.0, 20.0),
        }
    }
}

impl InputLimits {
    /// Maximum accepted net return rate
    pub fn net_return_cap(&self) -> f64 {
        self.net_return_rate.max
    }

    /// Look up a range by its field name, as used in limits files
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Bounds> {
        let bounds = match field {
            "start_age" => &mut self.start_age,
            "current_pool" => &mut self.current_pool,
            "annual_contribution" => &mut self.annual_contribution,
            "contribution_years" => &mut self.contribution_years,
            "net_return_rate" => &mut self.net_return_rate,
            "annual_cost_today" => &mut self.annual_cost_today,
            "cost_growth_rate" => &mut self.cost_growth_rate,
            "duration_years" => &mut self.duration_years,
            "gap_years" => &mut self.gap_years,
            "buffer_rate" => &mut self.buffer_rate,
            "cost_reduction_factor" => &mut self.cost_reduction_factor,
            "annual_contract_benefit" => &mut self.annual_contract_benefit,
            "contract_benefit_years" => &mut self.contract_benefit_years,
            _ => return None,
        };
        Some(bounds)
    }

    /// Clamp every committed value into its range
    ///
    /// Also raises the start age to the current age when the latter is known,
    /// so the scenario never starts in the past.
    pub fn normalize(&self, household: &Household) -> Household {
        let mut out = household.clone();

        out.start_age = self.start_age.clamp_u8(out.start_age);
        if let Some(age) = out.current_age.filter(|&a| a > 0) {
            if out.start_age < age {
                out.start_age = age;
            }
        }

        out.current_pool = self.current_pool.clamp(finite_or(out.current_pool, 0.0));
        out.annual_contribution = self
            .annual_contribution
            .clamp(finite_or(out.annual_contribution, 0.0));
        out.contribution_years = self.contribution_years.clamp_u32(out.contribution_years);
        out.net_return_rate = self.net_return_rate.clamp(finite_or(out.net_return_rate, 0.0));
        out.annual_cost_today = self
            .annual_cost_today
            .clamp(finite_or(out.annual_cost_today, self.annual_cost_today.min));
        out.cost_growth_rate = self.cost_growth_rate.clamp(finite_or(out.cost_growth_rate, 0.0));
        out.duration_years = self.duration_years.clamp_u32(out.duration_years);
        out.gap_years = self.gap_years.clamp_u32(out.gap_years);
        out.buffer_rate = self.buffer_rate.clamp(finite_or(out.buffer_rate, 0.0));
        out.cost_reduction_factor = self
            .cost_reduction_factor
            .clamp(finite_or(out.cost_reduction_factor, 1.0));
        out.annual_contract_benefit = self
            .annual_contract_benefit
            .clamp(finite_or(out.annual_contract_benefit, 0.0));
        out.contract_benefit_years = self.contract_benefit_years.clamp_u32(out.contract_benefit_years);

        if out != *household {
            log::warn!(
                "Household {}: committed values were moved into their allowed ranges",
                household.household_id
            );
        }

        out
    }

    /// Reject inputs outside the engine's domain
    pub fn validate(&self, household: &Household) -> Result<(), InputError> {
        non_negative("current_pool", household.current_pool)?;
        non_negative("annual_contribution", household.annual_contribution)?;
        Bounds::new(0.0, self.net_return_cap()).check("net_return_rate", household.net_return_rate)?;

        positive("annual_cost_today", household.annual_cost_today)?;
        Bounds::new(0.0, MAX_COST_GROWTH_RATE).check("cost_growth_rate", household.cost_growth_rate)?;
        if household.duration_years == 0 {
            return Err(InputError::NotPositive {
                field: "duration_years",
                value: 0.0,
            });
        }
        self.duration_years
            .check("duration_years", household.duration_years as f64)?;
        self.gap_years.check("gap_years", household.gap_years as f64)?;
        Bounds::new(0.0, MAX_BUFFER_RATE).check("buffer_rate", household.buffer_rate)?;
        Bounds::new(0.0, 1.0).check("cost_reduction_factor", household.cost_reduction_factor)?;
        non_negative("annual_contract_benefit", household.annual_contract_benefit)?;

        Ok(())
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    Bounds::new(0.0, f64::INFINITY).check(field, value)
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::EpisodeStructure;

    #[test]
    fn test_default_household_is_valid() {
        let limits = InputLimits::default();
        assert!(limits.validate(&Household::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_rate_above_cap() {
        let limits = InputLimits::default();
        let household = Household {
            net_return_rate: 0.09,
            ..Household::default()
        };
        let err = limits.validate(&household).unwrap_err();
        assert_eq!(err.field(), "net_return_rate");
    }

    #[test]
    fn test_validate_rejects_negative_and_non_finite() {
        let limits = InputLimits::default();

        let negative = Household {
            current_pool: -1.0,
            ..Household::default()
        };
        assert_eq!(limits.validate(&negative).unwrap_err().field(), "current_pool");

        let nan = Household {
            buffer_rate: f64::NAN,
            ..Household::default()
        };
        assert!(matches!(
            limits.validate(&nan),
            Err(InputError::NotFinite { field: "buffer_rate", .. })
        ));

        let no_duration = Household {
            duration_years: 0,
            ..Household::default()
        };
        assert!(matches!(
            limits.validate(&no_duration),
            Err(InputError::NotPositive { field: "duration_years", .. })
        ));
    }

    #[test]
    fn test_validate_bounds_scenario_horizon() {
        let limits = InputLimits::default();

        let huge_gap = Household {
            episode_structure: EpisodeStructure::Two,
            gap_years: u32::MAX,
            duration_years: 1,
            ..Household::default()
        };
        assert_eq!(limits.validate(&huge_gap).unwrap_err().field(), "gap_years");

        let long_care = Household {
            duration_years: 2_000_000_000,
            ..Household::default()
        };
        assert!(matches!(
            limits.validate(&long_care),
            Err(InputError::OutOfRange { field: "duration_years", .. })
        ));

        let longest = Household {
            episode_structure: EpisodeStructure::Two,
            gap_years: 20,
            duration_years: 20,
            ..Household::default()
        };
        assert!(limits.validate(&longest).is_ok());
    }

    #[test]
    fn test_normalize_clamps_ranges() {
        let limits = InputLimits::default();
        let household = Household {
            start_age: 120,
            duration_years: 0,
            contribution_years: 55,
            buffer_rate: 0.9,
            annual_cost_today: 10_000.0,
            net_return_rate: 0.2,
            ..Household::default()
        };
        let normalized = limits.normalize(&household);

        assert_eq!(normalized.start_age, 110);
        assert_eq!(normalized.duration_years, 1);
        assert_eq!(normalized.contribution_years, 40);
        assert_eq!(normalized.buffer_rate, 0.5);
        assert_eq!(normalized.annual_cost_today, 50_000.0);
        assert_eq!(normalized.net_return_rate, 0.08);
        assert!(limits.validate(&normalized).is_ok());
    }

    #[test]
    fn test_normalize_raises_start_age_to_current_age() {
        let limits = InputLimits::default();
        let household = Household {
            current_age: Some(88),
            start_age: 85,
            ..Household::default()
        };
        assert_eq!(limits.normalize(&household).start_age, 88);
    }

    #[test]
    fn test_field_lookup() {
        let mut limits = InputLimits::default();
        limits.get_mut("net_return_rate").unwrap().max = 0.12;
        assert_eq!(limits.net_return_cap(), 0.12);
        assert!(limits.get_mut("plan_b").is_none());
    }
}
