//! Run the stress test for every household in a CSV file
//!
//! Usage: run_batch [households.csv] [output.csv]
//! Defaults to data/households.csv and batch_summary.csv.

use anyhow::{Context, Result};
use ltc_stress_test::household::{load_households, loader::DEFAULT_HOUSEHOLDS_PATH};
use ltc_stress_test::report::{format_currency, write_summary_csv, SummaryRow};
use ltc_stress_test::{ScenarioRunner, StressTestConfig};
use std::fs::File;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| DEFAULT_HOUSEHOLDS_PATH.to_string());
    let output_path = args.next().unwrap_or_else(|| "batch_summary.csv".to_string());

    let start = Instant::now();
    println!("Loading households from {}...", input_path);
    let households = load_households(&input_path)
        .with_context(|| format!("Failed to load households from {}", input_path))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let config = StressTestConfig {
        detailed_output: false,
        ..StressTestConfig::default()
    };

    let run_start = Instant::now();
    let results = runner.run_batch(&households, config);
    println!("Stress tests complete in {:?}", run_start.elapsed());

    let mut rows = Vec::with_capacity(results.len());
    let mut rejected = 0usize;
    for (household, result) in households.iter().zip(&results) {
        match result {
            Ok(result) => rows.push(SummaryRow::from_result(result)),
            Err(e) => {
                rejected += 1;
                log::warn!("Household {} rejected: {}", household.household_id, e);
            }
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    write_summary_csv(file, &rows)?;
    println!("Output written to {}", output_path);

    let short = rows.iter().filter(|r| r.first_shortfall_year.is_some()).count();
    let total_gap: f64 = rows.iter().map(|r| r.gap).sum();

    println!("\nBatch Summary:");
    println!("  Households run:      {}", rows.len());
    println!("  Rejected inputs:     {}", rejected);
    println!("  With a shortfall:    {}", short);
    println!("  Total funding gap:   {}", format_currency(total_gap));
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
