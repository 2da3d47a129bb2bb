//! Depletion simulator: draws each year's out-of-pocket cost from the pool
//!
//! Per year: draw `max(0, cost - offset)`, floor the balance at zero, then
//! grow the remainder at the net return rate. A year is a shortfall when the
//! draw exceeds the balance at the start of that year.

use super::ledger::{DepletionResult, LedgerRow};
use super::numeric::floor_zero;
use super::state::DepletionState;

/// Run the depletion ledger for one scenario
///
/// `costs` and `offsets` are expected to have equal length; a missing offset
/// counts as zero. The loop is bounded by the cost series length.
pub fn simulate(
    pool_at_start: f64,
    costs: &[f64],
    offsets: &[f64],
    net_return_rate: f64,
) -> DepletionResult {
    debug_assert_eq!(costs.len(), offsets.len(), "cost and offset series differ in length");

    let mut result = DepletionResult::new(pool_at_start);
    let mut state = DepletionState::from_pool(pool_at_start);

    for (t, &cost) in costs.iter().enumerate() {
        state.advance_year();

        let offset = offsets.get(t).copied().unwrap_or(0.0);
        let row = simulate_year(&state, cost, offset, net_return_rate);

        state.record(row.shortfall, row.end_balance);
        result.add_row(row);
    }

    result.first_shortfall_year = state.first_shortfall_year;
    result.years_fully_covered = match state.first_shortfall_year {
        Some(year) => year - 1,
        None => result.horizon_years(),
    };

    result
}

/// Single-year state transition
fn simulate_year(state: &DepletionState, cost: f64, offset: f64, net_return_rate: f64) -> LedgerRow {
    let start_balance = state.balance;
    let out_of_pocket = floor_zero(cost - offset);
    let shortfall = out_of_pocket > start_balance;

    let after_draw = floor_zero(start_balance - out_of_pocket);
    // Growth applies every year; a depleted pool earns zero on zero
    let end_balance = after_draw * (1.0 + net_return_rate);

    LedgerRow {
        year_index: state.year_index,
        start_balance,
        cost,
        offset,
        out_of_pocket,
        growth: end_balance - after_draw,
        end_balance,
        shortfall,
        unfunded: floor_zero(out_of_pocket - start_balance),
    }
}
