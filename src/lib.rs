//! LTC Stress Test - deterministic long-term-care savings stress test
//!
//! This library provides:
//! - Savings accumulation up to the start of a care scenario
//! - Care cost schedules for one or two episodes, with inflation, buffer and contract offsets
//! - Year-by-year depletion ledgers with shortfall detection
//! - Input ranges, normalization and wizard field state
//! - Batch runs and single-lever sensitivity sweeps

pub mod assumptions;
pub mod error;
pub mod household;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, InputLimits};
pub use error::{InputError, LoadError};
pub use household::{EpisodeStructure, Household};
pub use projection::{StressTestConfig, StressTestEngine, StressTestResult};
pub use scenario::{Lever, ScenarioRunner};
