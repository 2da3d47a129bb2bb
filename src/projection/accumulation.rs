//! Accumulation projector: grows today's pool and contributions to the scenario start
//!
//! Each year growth is applied first, then the year's contribution is added.
//! Contributions run for `min(contribution_years, years_to_start)` years.

use serde::{Deserialize, Serialize};

use super::numeric::compound;
use crate::household::ProjectionInput;

/// One pre-scenario accumulation year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulationRow {
    /// Year before the scenario (1-indexed)
    pub year: u32,
    pub start_balance: f64,
    pub growth: f64,
    pub contribution: f64,
    pub end_balance: f64,
}

/// Pool value at the scenario start
///
/// Inputs are trusted: callers validate them first. With `years_to_start == 0`
/// the result is exactly `current_pool`.
pub fn project(
    current_pool: f64,
    annual_contribution: f64,
    contribution_years: u32,
    net_return_rate: f64,
    years_to_start: u32,
) -> f64 {
    let contribution_limit = contribution_years.min(years_to_start);
    let mut pool = current_pool;

    for year in 1..=years_to_start {
        pool *= 1.0 + net_return_rate;
        if year <= contribution_limit {
            pool += annual_contribution;
        }
    }

    pool
}

/// Year-by-year view of the same accumulation `project` computes
pub fn accumulation_schedule(input: &ProjectionInput) -> Vec<AccumulationRow> {
    let contribution_limit = input.contribution_years.min(input.years_to_start);
    let mut rows = Vec::with_capacity(input.years_to_start as usize);
    let mut pool = input.current_pool;

    for year in 1..=input.years_to_start {
        let start_balance = pool;
        pool *= 1.0 + input.net_return_rate;
        let growth = pool - start_balance;
        let contribution = if year <= contribution_limit {
            input.annual_contribution
        } else {
            0.0
        };
        pool += contribution;

        rows.push(AccumulationRow {
            year,
            start_balance,
            growth,
            contribution,
            end_balance: pool,
        });
    }

    rows
}

/// Closed-form end-of-year annuity value, used to cross-check the loop
///
/// `pool(1+r)^n + pmt * ((1+r)^k - 1) / r * (1+r)^(n-k)` with
/// `k = min(contribution_years, n)`.
pub fn future_value_closed_form(input: &ProjectionInput) -> f64 {
    let n = input.years_to_start;
    let k = input.contribution_years.min(n);
    let r = input.net_return_rate;

    let grown_pool = input.current_pool * compound(r, n);
    let contributions = if r == 0.0 {
        input.annual_contribution * k as f64
    } else {
        input.annual_contribution * (compound(r, k) - 1.0) / r * compound(r, n - k)
    };

    grown_pool + contributions
}

impl ProjectionInput {
    /// Pool value at the scenario start
    pub fn project(&self) -> f64 {
        project(
            self.current_pool,
            self.annual_contribution,
            self.contribution_years,
            self.net_return_rate,
            self.years_to_start,
        )
    }
}
