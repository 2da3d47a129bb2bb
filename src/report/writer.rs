//! Ledger table and CSV export

use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

use super::bars::{render_bar, stacked_bars};
use super::format::{format_currency, format_multiplier, format_pct};
use crate::projection::numeric::round_cents;
use crate::projection::{LedgerRow, StressTestResult};

/// Write the ledger as CSV with amounts rounded to cents
pub fn write_ledger_csv<W: Write>(writer: W, ledger: &[LedgerRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in ledger {
        wtr.serialize(LedgerRow {
            start_balance: round_cents(row.start_balance),
            cost: round_cents(row.cost),
            offset: round_cents(row.offset),
            out_of_pocket: round_cents(row.out_of_pocket),
            growth: round_cents(row.growth),
            end_balance: round_cents(row.end_balance),
            unfunded: round_cents(row.unfunded),
            ..*row
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Fixed-width ledger table with a stacked bar per year
pub fn ledger_table(ledger: &[LedgerRow]) -> String {
    let bars = stacked_bars(ledger);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}  {}",
        "Year", "Start", "Cost", "Offset", "OutOfPocket", "End", "Bar"
    );
    let _ = writeln!(out, "{}", "-".repeat(100));

    for (row, bar) in ledger.iter().zip(&bars) {
        let _ = writeln!(
            out,
            "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}  {}{}",
            row.year_index,
            format_currency(row.start_balance),
            format_currency(row.cost),
            format_currency(row.offset),
            format_currency(row.out_of_pocket),
            format_currency(row.end_balance),
            render_bar(bar, 20),
            if row.shortfall { "  shortfall" } else { "" },
        );
    }

    out
}

/// Headline text for one stress test
pub fn summary_text(result: &StressTestResult) -> String {
    let household = &result.household;
    let depletion = &result.depletion;
    let coverage = &result.coverage;
    let mut out = String::new();

    let _ = writeln!(out, "Household {}", result.household_id);
    let _ = writeln!(
        out,
        "  Episodes: {}, {} years each, gap {} years",
        household.episode_structure.as_str(),
        household.duration_years,
        household.gap_years,
    );
    let _ = writeln!(
        out,
        "  Years to start: {}, net return {}, cost growth {}, buffer {}",
        result.years_to_start,
        format_pct(household.net_return_rate),
        format_pct(household.cost_growth_rate),
        format_multiplier(coverage.buffer_multiplier),
    );
    let _ = writeln!(out, "  Pool at start:      {}", format_currency(result.pool_at_start));
    let _ = writeln!(out, "  Scenario cost:      {}", format_currency(coverage.total_cost));
    let _ = writeln!(out, "  Contract offset:    {}", format_currency(coverage.total_offset));
    let _ = writeln!(out, "  Required pool:      {}", format_currency(coverage.required_pool));
    let _ = writeln!(out, "  Gap:                {}", format_currency(coverage.gap));

    match depletion.first_shortfall_year {
        Some(year) => {
            let _ = writeln!(
                out,
                "  Shortfall in year {} ({} of {} years fully covered)",
                year,
                depletion.years_fully_covered,
                depletion.horizon_years()
            );
        }
        None => {
            let _ = writeln!(
                out,
                "  All {} years covered, ending balance {}",
                depletion.horizon_years(),
                format_currency(depletion.ending_balance)
            );
        }
    }

    out
}

/// One line of a batch summary file
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub household_id: u32,
    pub years_to_start: u32,
    pub pool_at_start: f64,
    pub horizon_years: u32,
    pub total_cost: f64,
    pub total_offset: f64,
    pub required_pool: f64,
    pub gap: f64,
    pub first_shortfall_year: Option<u32>,
    pub years_fully_covered: u32,
    pub ending_balance: f64,
    pub total_unfunded: f64,
}

impl SummaryRow {
    pub fn from_result(result: &StressTestResult) -> Self {
        let summary = result.depletion.summary();
        Self {
            household_id: result.household_id,
            years_to_start: result.years_to_start,
            pool_at_start: round_cents(result.pool_at_start),
            horizon_years: result.schedule.horizon_years,
            total_cost: round_cents(result.coverage.total_cost),
            total_offset: round_cents(result.coverage.total_offset),
            required_pool: round_cents(result.coverage.required_pool),
            gap: round_cents(result.coverage.gap),
            first_shortfall_year: result.depletion.first_shortfall_year,
            years_fully_covered: result.depletion.years_fully_covered,
            ending_balance: round_cents(result.depletion.ending_balance),
            total_unfunded: round_cents(summary.total_unfunded),
        }
    }
}

pub fn write_summary_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{EpisodeStructure, Household};
    use crate::projection::{simulate, StressTestConfig, StressTestEngine};
    use crate::Assumptions;

    #[test]
    fn test_ledger_csv_has_header_and_rows() {
        let result = simulate(250_000.0, &[100_000.0; 3], &[0.0; 3], 0.0);
        let mut buf = Vec::new();
        write_ledger_csv(&mut buf, &result.ledger).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "year_index,start_balance,cost,offset,out_of_pocket,growth,end_balance,shortfall,unfunded"
        );
        assert_eq!(lines[3], "3,50000.0,100000.0,0.0,100000.0,0.0,0.0,true,50000.0");
    }

    #[test]
    fn test_summary_text_describes_scenario() {
        let engine = StressTestEngine::new(Assumptions::default_planning(), StressTestConfig::default());
        let household = Household {
            current_pool: 0.0,
            episode_structure: EpisodeStructure::Two,
            gap_years: 2,
            ..Household::default()
        };
        let text = summary_text(&engine.run(&household).unwrap());

        assert!(text.contains("Episodes: TWO, 5 years each, gap 2 years"));
        assert!(text.contains("Shortfall in year 1 (0 of 7 years fully covered)"));
    }

    #[test]
    fn test_table_marks_shortfall_year() {
        let result = simulate(150_000.0, &[100_000.0; 2], &[0.0; 2], 0.0);
        let table = ledger_table(&result.ledger);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(!lines[2].ends_with("shortfall"));
        assert!(lines[3].ends_with("shortfall"));
        assert!(lines[2].contains("$150,000"));
    }
}
