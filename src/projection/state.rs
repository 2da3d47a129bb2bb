//! Running state of the depletion simulation

/// Balance state carried from one scenario year to the next
#[derive(Debug, Clone)]
pub struct DepletionState {
    /// Current scenario year (1-indexed, 0 before the first year)
    pub year_index: u32,

    /// Liquid balance at the start of the current year
    pub balance: f64,

    /// First year whose draw exceeded the opening balance
    pub first_shortfall_year: Option<u32>,
}

impl DepletionState {
    /// Initialize state from the pool available at the scenario start
    pub fn from_pool(pool_at_start: f64) -> Self {
        Self {
            year_index: 0,
            balance: pool_at_start,
            first_shortfall_year: None,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year_index += 1;
    }

    /// Record this year's outcome
    pub fn record(&mut self, shortfall: bool, end_balance: f64) {
        if shortfall && self.first_shortfall_year.is_none() {
            self.first_shortfall_year = Some(self.year_index);
        }
        self.balance = end_balance;
    }

    pub fn has_shortfall(&self) -> bool {
        self.first_shortfall_year.is_some()
    }
}
