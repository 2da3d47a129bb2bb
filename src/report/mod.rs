//! Results view helpers: formatting, stacked bars, tables and CSV export

mod bars;
mod format;
mod writer;

pub use bars::{bar_scale, render_bar, stacked_bars, BarSegments};
pub use format::{format_currency, format_multiplier, format_pct};
pub use writer::{ledger_table, summary_text, write_ledger_csv, write_summary_csv, SummaryRow};
