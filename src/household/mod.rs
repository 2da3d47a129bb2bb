//! Household inputs, batch loading and wizard field state

mod data;
mod draft;
pub mod loader;

pub use data::{
    current_age_from_birth_year, current_year, EpisodeStructure, Household, ProjectionInput,
    ScenarioInput, MIN_BIRTH_YEAR,
};
pub use draft::{DraftBirthYear, DraftNumber};
pub use loader::{load_default_households, load_households, load_households_from_reader};
