//! Stress test projection: accumulation, scenario composition and depletion

mod accumulation;
mod composer;
mod coverage;
mod engine;
mod ledger;
pub mod numeric;
mod simulator;
mod state;

pub use accumulation::{accumulation_schedule, future_value_closed_form, project, AccumulationRow};
pub use composer::{base_cost, compose, horizon_years, CostSchedule};
pub use coverage::CoverageSummary;
pub use engine::{StressTestConfig, StressTestEngine, StressTestResult};
pub use ledger::{DepletionResult, LedgerRow, LedgerSummary};
pub use simulator::simulate;
pub use state::DepletionState;
