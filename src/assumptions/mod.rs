//! Planning assumptions: input ranges, the net return cap and wizard defaults

mod limits;
pub mod loader;

pub use limits::{Bounds, InputLimits, MAX_BUFFER_RATE, MAX_COST_GROWTH_RATE};

use crate::error::LoadError;
use crate::household::Household;
use std::path::Path;

/// Container for all stress-test assumptions
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub limits: InputLimits,
    /// Values a fresh wizard session starts from
    pub defaults: Household,
}

impl Assumptions {
    /// Built-in ranges and wizard defaults
    pub fn default_planning() -> Self {
        Self {
            limits: InputLimits::default(),
            defaults: Household::default(),
        }
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            limits: loader::load_input_limits(path)?,
            defaults: Household::default(),
        })
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_planning()
    }
}
