//! Household data structures: committed wizard inputs and the core's input records

use serde::{Deserialize, Serialize};

/// Earliest birth year accepted when deriving the current age
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Care episode structure of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EpisodeStructure {
    /// Single care episode
    #[default]
    One,
    /// Two sequential episodes (e.g. a couple), the second starting `gap_years` after the first
    Two,
}

impl EpisodeStructure {
    /// Parse the labels used in household files
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "ONE" | "1" | "SINGLE" => Some(EpisodeStructure::One),
            "TWO" | "2" | "COUPLE" => Some(EpisodeStructure::Two),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeStructure::One => "ONE",
            EpisodeStructure::Two => "TWO",
        }
    }
}

/// Inputs to the accumulation projector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Liquid assets available today
    pub current_pool: f64,
    /// Amount added at the end of each contribution year
    pub annual_contribution: f64,
    /// Number of years contributions are made (capped by years to start)
    pub contribution_years: u32,
    /// Annual compounding rate for the pool
    pub net_return_rate: f64,
    /// Years between today and the scenario start
    pub years_to_start: u32,
}

/// Inputs to the scenario composer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Annual care cost for one person in today's money
    pub annual_cost_today: f64,
    /// Annual cost inflation
    pub cost_growth_rate: f64,
    /// Length of one care episode in years
    pub duration_years: u32,
    pub episode_structure: EpisodeStructure,
    /// Offset of the second episode, only used for `EpisodeStructure::Two`
    pub gap_years: u32,
    /// Safety margin applied after growth
    pub buffer_rate: f64,
    /// Mitigation multiplier, 1.0 means no reduction
    pub cost_reduction_factor: f64,
    pub has_contract: bool,
    /// Fixed nominal benefit paid per year while the contract pays out
    pub annual_contract_benefit: f64,
    pub contract_benefit_years: u32,
    /// Years between today and the scenario start, used to pre-inflate today's cost
    pub years_to_start: u32,
}

/// Committed inputs for one household stress test
///
/// Every field is the last committed numeric value of the corresponding
/// wizard field. Draft text never reaches this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Identifier used in batch files
    #[serde(default)]
    pub household_id: u32,

    /// Current age, `None` when the birth year is unknown or invalid
    #[serde(default)]
    pub current_age: Option<u8>,

    /// Age at which the care scenario begins
    pub start_age: u8,

    pub current_pool: f64,
    pub annual_contribution: f64,
    pub contribution_years: u32,
    pub net_return_rate: f64,

    pub annual_cost_today: f64,
    #[serde(default)]
    pub cost_growth_rate: f64,
    pub duration_years: u32,
    #[serde(default)]
    pub episode_structure: EpisodeStructure,
    #[serde(default)]
    pub gap_years: u32,
    #[serde(default)]
    pub buffer_rate: f64,
    #[serde(default = "default_cost_reduction_factor")]
    pub cost_reduction_factor: f64,

    #[serde(default)]
    pub has_contract: bool,
    #[serde(default)]
    pub annual_contract_benefit: f64,
    #[serde(default)]
    pub contract_benefit_years: u32,
}

fn default_cost_reduction_factor() -> f64 {
    1.0
}

impl Default for Household {
    /// Starting values of the stress-test wizard
    fn default() -> Self {
        Self {
            household_id: 0,
            current_age: None,
            start_age: 85,
            current_pool: 0.0,
            annual_contribution: 100_000.0,
            contribution_years: 10,
            net_return_rate: 0.03,
            annual_cost_today: 300_000.0,
            cost_growth_rate: 0.0,
            duration_years: 5,
            episode_structure: EpisodeStructure::One,
            gap_years: 0,
            buffer_rate: 0.18,
            cost_reduction_factor: 1.0,
            has_contract: false,
            annual_contract_benefit: 138_000.0,
            contract_benefit_years: 6,
        }
    }
}

impl Household {
    /// Years until the scenario starts; zero when the current age is unknown
    pub fn years_to_start(&self) -> u32 {
        match self.current_age {
            Some(age) if age > 0 => self.start_age.saturating_sub(age) as u32,
            _ => 0,
        }
    }

    /// Set the current age from a birth year, clearing it when the year is invalid
    pub fn with_birth_year(mut self, birth_year: i32, now_year: i32) -> Self {
        self.current_age = current_age_from_birth_year(birth_year, now_year);
        self
    }

    pub fn projection_input(&self) -> ProjectionInput {
        ProjectionInput {
            current_pool: self.current_pool,
            annual_contribution: self.annual_contribution,
            contribution_years: self.contribution_years,
            net_return_rate: self.net_return_rate,
            years_to_start: self.years_to_start(),
        }
    }

    pub fn scenario_input(&self) -> ScenarioInput {
        ScenarioInput {
            annual_cost_today: self.annual_cost_today,
            cost_growth_rate: self.cost_growth_rate,
            duration_years: self.duration_years,
            episode_structure: self.episode_structure,
            gap_years: self.gap_years,
            buffer_rate: self.buffer_rate,
            cost_reduction_factor: self.cost_reduction_factor,
            has_contract: self.has_contract,
            annual_contract_benefit: self.annual_contract_benefit,
            contract_benefit_years: self.contract_benefit_years,
            years_to_start: self.years_to_start(),
        }
    }
}

/// Derive the current age from a four-digit birth year
///
/// Years before 1900 or after `now_year` are invalid. An age of zero is
/// treated as unknown, matching the wizard which only trusts positive ages.
pub fn current_age_from_birth_year(birth_year: i32, now_year: i32) -> Option<u8> {
    if birth_year < MIN_BIRTH_YEAR || birth_year > now_year {
        return None;
    }
    let age = now_year - birth_year;
    if age <= 0 {
        return None;
    }
    u8::try_from(age).ok()
}

/// Current calendar year from the local clock
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_from_birth_year() {
        assert_eq!(current_age_from_birth_year(1957, 2026), Some(69));
        assert_eq!(current_age_from_birth_year(1899, 2026), None);
        assert_eq!(current_age_from_birth_year(2027, 2026), None);
        // Born this year: age 0 is treated as unknown
        assert_eq!(current_age_from_birth_year(2026, 2026), None);
    }

    #[test]
    fn test_years_to_start() {
        let mut household = Household::default();
        assert_eq!(household.years_to_start(), 0);

        household.current_age = Some(70);
        assert_eq!(household.years_to_start(), 15);

        // Start age below current age never goes negative
        household.current_age = Some(90);
        assert_eq!(household.years_to_start(), 0);
    }

    #[test]
    fn test_inputs_share_years_to_start() {
        let household = Household::default().with_birth_year(1960, 2025);
        assert_eq!(household.current_age, Some(65));
        assert_eq!(household.projection_input().years_to_start, 20);
        assert_eq!(household.scenario_input().years_to_start, 20);
    }

    #[test]
    fn test_episode_structure_labels() {
        assert_eq!(EpisodeStructure::from_label("two"), Some(EpisodeStructure::Two));
        assert_eq!(EpisodeStructure::from_label(" ONE "), Some(EpisodeStructure::One));
        assert_eq!(EpisodeStructure::from_label("three"), None);
    }
}
