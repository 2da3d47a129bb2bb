//! Load households from a batch CSV file

use super::{current_age_from_birth_year, current_year, EpisodeStructure, Household};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Default location of the batch household file
pub const DEFAULT_HOUSEHOLDS_PATH: &str = "data/households.csv";

/// Raw CSV row matching the households.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "HouseholdID")]
    household_id: u32,
    #[serde(rename = "BirthYear")]
    birth_year: Option<i32>,
    #[serde(rename = "StartAge")]
    start_age: u8,
    #[serde(rename = "CurrentPool")]
    current_pool: f64,
    #[serde(rename = "AnnualContribution")]
    annual_contribution: f64,
    #[serde(rename = "ContributionYears")]
    contribution_years: u32,
    #[serde(rename = "NetReturn")]
    net_return_rate: f64,
    #[serde(rename = "AnnualCostToday")]
    annual_cost_today: f64,
    #[serde(rename = "CostGrowth")]
    cost_growth_rate: f64,
    #[serde(rename = "DurationYears")]
    duration_years: u32,
    #[serde(rename = "EpisodeStructure")]
    episode_structure: String,
    #[serde(rename = "GapYears")]
    gap_years: u32,
    #[serde(rename = "Buffer")]
    buffer_rate: f64,
    #[serde(rename = "CostReduction")]
    cost_reduction_factor: Option<f64>,
    #[serde(rename = "HasContract")]
    has_contract: String,
    #[serde(rename = "ContractBenefit")]
    annual_contract_benefit: f64,
    #[serde(rename = "ContractBenefitYears")]
    contract_benefit_years: u32,
}

impl CsvRow {
    fn to_household(self, now_year: i32) -> Result<Household, LoadError> {
        let episode_structure = EpisodeStructure::from_label(&self.episode_structure)
            .ok_or_else(|| LoadError::UnknownEpisodeStructure(self.episode_structure.clone()))?;

        let has_contract = match self.has_contract.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => true,
            "false" | "no" | "n" | "0" | "" => false,
            other => {
                return Err(LoadError::InvalidNumber {
                    field: "HasContract".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Household {
            household_id: self.household_id,
            current_age: self
                .birth_year
                .and_then(|year| current_age_from_birth_year(year, now_year)),
            start_age: self.start_age,
            current_pool: self.current_pool,
            annual_contribution: self.annual_contribution,
            contribution_years: self.contribution_years,
            net_return_rate: self.net_return_rate,
            annual_cost_today: self.annual_cost_today,
            cost_growth_rate: self.cost_growth_rate,
            duration_years: self.duration_years,
            episode_structure,
            gap_years: self.gap_years,
            buffer_rate: self.buffer_rate,
            cost_reduction_factor: self.cost_reduction_factor.unwrap_or(1.0),
            has_contract,
            annual_contract_benefit: self.annual_contract_benefit,
            contract_benefit_years: self.contract_benefit_years,
        })
    }
}

/// Load all households from a CSV file, deriving ages against the current year
pub fn load_households<P: AsRef<Path>>(path: P) -> Result<Vec<Household>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_households(reader, current_year())
}

/// Load households from any reader (e.g. a request body)
pub fn load_households_from_reader<R: std::io::Read>(
    reader: R,
    now_year: i32,
) -> Result<Vec<Household>, LoadError> {
    collect_households(Reader::from_reader(reader), now_year)
}

/// Load households from the default data/households.csv location
pub fn load_default_households() -> Result<Vec<Household>, LoadError> {
    load_households(DEFAULT_HOUSEHOLDS_PATH)
}

fn collect_households<R: std::io::Read>(
    mut reader: Reader<R>,
    now_year: i32,
) -> Result<Vec<Household>, LoadError> {
    let mut households = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        households.push(row.to_household(now_year)?);
    }

    log::info!("Loaded {} households", households.len());
    Ok(households)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "HouseholdID,BirthYear,StartAge,CurrentPool,AnnualContribution,ContributionYears,NetReturn,AnnualCostToday,CostGrowth,DurationYears,EpisodeStructure,GapYears,Buffer,CostReduction,HasContract,ContractBenefit,ContractBenefitYears";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{HEADER}\n\
             1,1957,85,250000,100000,10,0.03,300000,0.03,5,ONE,0,0.18,1.0,false,0,0\n\
             2,,85,5000000,0,0,0.05,100000,0,5,TWO,2,0,,yes,138000,6\n"
        );
        let households = load_households_from_reader(data.as_bytes(), 2026).unwrap();
        assert_eq!(households.len(), 2);

        let first = &households[0];
        assert_eq!(first.household_id, 1);
        assert_eq!(first.current_age, Some(69));
        assert_eq!(first.years_to_start(), 16);
        assert!(!first.has_contract);

        let second = &households[1];
        assert_eq!(second.current_age, None);
        assert_eq!(second.episode_structure, EpisodeStructure::Two);
        assert_eq!(second.cost_reduction_factor, 1.0);
        assert!(second.has_contract);
        assert_eq!(second.contract_benefit_years, 6);
    }

    #[test]
    fn test_unknown_episode_structure() {
        let data = format!("{HEADER}\n1,1957,85,0,0,0,0,300000,0,5,THREE,0,0,1,no,0,0\n");
        let err = load_households_from_reader(data.as_bytes(), 2026).unwrap_err();
        assert!(matches!(err, LoadError::UnknownEpisodeStructure(ref s) if s == "THREE"));
    }

    #[test]
    fn test_load_default_households() {
        let households = load_default_households().expect("Failed to load households");
        assert!(!households.is_empty());
        assert!(households.iter().all(|h| h.duration_years >= 1));
    }
}
