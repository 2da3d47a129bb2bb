//! Ledger output structures for the depletion simulation

use serde::{Deserialize, Serialize};

/// A single scenario year of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Scenario year (1-indexed)
    pub year_index: u32,

    /// Balance available at the start of the year
    pub start_balance: f64,

    /// Gross care cost for the year
    pub cost: f64,

    /// Contractual offset for the year
    pub offset: f64,

    /// `max(0, cost - offset)`
    pub out_of_pocket: f64,

    /// Return earned on the post-draw balance
    pub growth: f64,

    /// Balance after the draw and growth, never negative
    pub end_balance: f64,

    /// The draw exceeded the opening balance
    pub shortfall: bool,

    /// Part of the draw the liquid pool could not pay
    pub unfunded: f64,
}

/// Complete depletion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionResult {
    pub ledger: Vec<LedgerRow>,

    /// First year with a shortfall, `None` when the pool covers every year
    pub first_shortfall_year: Option<u32>,

    /// Years paid in full before the first shortfall
    pub years_fully_covered: u32,

    /// Balance after the final year (the starting pool when there are no years)
    pub ending_balance: f64,
}

impl DepletionResult {
    pub fn new(pool_at_start: f64) -> Self {
        Self {
            ledger: Vec::new(),
            first_shortfall_year: None,
            years_fully_covered: 0,
            ending_balance: pool_at_start,
        }
    }

    /// Add a ledger row
    pub fn add_row(&mut self, row: LedgerRow) {
        self.ending_balance = row.end_balance;
        self.ledger.push(row);
    }

    pub fn horizon_years(&self) -> u32 {
        self.ledger.len() as u32
    }

    /// Get summary statistics
    pub fn summary(&self) -> LedgerSummary {
        let total_cost: f64 = self.ledger.iter().map(|r| r.cost).sum();
        let total_offset: f64 = self.ledger.iter().map(|r| r.offset).sum();
        let total_out_of_pocket: f64 = self.ledger.iter().map(|r| r.out_of_pocket).sum();
        let total_growth: f64 = self.ledger.iter().map(|r| r.growth).sum();
        let total_unfunded: f64 = self.ledger.iter().map(|r| r.unfunded).sum();

        let lowest_balance = self
            .ledger
            .iter()
            .map(|r| r.end_balance)
            .fold(self.ending_balance, f64::min);
        let first_zero_balance_year = self
            .ledger
            .iter()
            .find(|r| r.end_balance <= 0.0)
            .map(|r| r.year_index);

        LedgerSummary {
            total_years: self.horizon_years(),
            total_cost,
            total_offset,
            total_out_of_pocket,
            total_growth,
            total_unfunded,
            lowest_balance,
            first_zero_balance_year,
            ending_balance: self.ending_balance,
        }
    }
}

/// Summary statistics for a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_years: u32,
    pub total_cost: f64,
    pub total_offset: f64,
    pub total_out_of_pocket: f64,
    pub total_growth: f64,
    pub total_unfunded: f64,
    pub lowest_balance: f64,
    pub first_zero_balance_year: Option<u32>,
    pub ending_balance: f64,
}
