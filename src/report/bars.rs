//! Normalized stacked bars for the results view
//!
//! Every segment is scaled by the largest `start_balance` or `cost` across the
//! ledger and clamped to [0, 100] percent.

use serde::{Deserialize, Serialize};

use crate::projection::numeric::clamp;
use crate::projection::LedgerRow;

/// Segment widths for one ledger year, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSegments {
    pub year_index: u32,
    pub offset_pct: f64,
    pub out_of_pocket_pct: f64,
    pub balance_pct: f64,
}

/// Scale shared by all bars of a ledger
pub fn bar_scale(ledger: &[LedgerRow]) -> f64 {
    ledger
        .iter()
        .map(|r| r.start_balance.max(r.cost))
        .fold(0.0, f64::max)
}

pub fn stacked_bars(ledger: &[LedgerRow]) -> Vec<BarSegments> {
    let scale = bar_scale(ledger);

    ledger
        .iter()
        .map(|row| BarSegments {
            year_index: row.year_index,
            offset_pct: width(row.offset, scale),
            out_of_pocket_pct: width(row.out_of_pocket, scale),
            balance_pct: width(row.end_balance, scale),
        })
        .collect()
}

fn width(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    clamp(value / scale * 100.0, 0.0, 100.0)
}

/// Render one bar as fixed-width text: `=` offset, `#` out-of-pocket, `.` balance
pub fn render_bar(segments: &BarSegments, width_chars: usize) -> String {
    let cells = |pct: f64| ((pct / 100.0) * width_chars as f64).round() as usize;
    let mut bar = String::with_capacity(width_chars * 3);
    bar.push_str(&"=".repeat(cells(segments.offset_pct)));
    bar.push_str(&"#".repeat(cells(segments.out_of_pocket_pct)));
    bar.push_str(&".".repeat(cells(segments.balance_pct)));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::simulate;
    use approx::assert_relative_eq;

    #[test]
    fn test_segments_scale_to_largest_value() {
        let result = simulate(400_000.0, &[200_000.0, 200_000.0], &[100_000.0, 0.0], 0.0);
        let bars = stacked_bars(&result.ledger);

        assert_eq!(bar_scale(&result.ledger), 400_000.0);
        assert_relative_eq!(bars[0].offset_pct, 25.0);
        assert_relative_eq!(bars[0].out_of_pocket_pct, 25.0);
        assert_relative_eq!(bars[0].balance_pct, 75.0);
        assert_relative_eq!(bars[1].out_of_pocket_pct, 50.0);
        assert_relative_eq!(bars[1].balance_pct, 25.0);
    }

    #[test]
    fn test_offset_above_scale_is_clamped() {
        let result = simulate(0.0, &[50_000.0], &[400_000.0], 0.0);
        let bars = stacked_bars(&result.ledger);
        assert_eq!(bars[0].offset_pct, 100.0);
        assert_eq!(bars[0].out_of_pocket_pct, 0.0);
    }

    #[test]
    fn test_all_zero_ledger() {
        let result = simulate(0.0, &[0.0, 0.0], &[0.0, 0.0], 0.0);
        assert!(stacked_bars(&result.ledger)
            .iter()
            .all(|b| b.offset_pct == 0.0 && b.out_of_pocket_pct == 0.0 && b.balance_pct == 0.0));
        assert!(stacked_bars(&[]).is_empty());
    }

    #[test]
    fn test_render_bar() {
        let segments = BarSegments {
            year_index: 1,
            offset_pct: 20.0,
            out_of_pocket_pct: 30.0,
            balance_pct: 50.0,
        };
        assert_eq!(render_bar(&segments, 10), "==###.....");
    }
}
