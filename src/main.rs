//! LTC Stress Test CLI
//!
//! Runs one household through the stress test, or sweeps a single lever.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::path::PathBuf;

use ltc_stress_test::household::current_year;
use ltc_stress_test::report::{format_currency, format_pct, ledger_table, summary_text, write_ledger_csv};
use ltc_stress_test::{
    Assumptions, EpisodeStructure, Household, Lever, ScenarioRunner, StressTestConfig,
};

#[derive(Parser)]
#[command(
    name = "ltc-stress",
    version,
    about = "Stress-test long-term-care savings against a multi-year care scenario"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding input_limits.csv (built-in ranges when omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the stress test for one household
    Run {
        #[command(flatten)]
        household: HouseholdArgs,

        /// Write the depletion ledger to this CSV file
        #[arg(long)]
        ledger_csv: Option<PathBuf>,
    },
    /// Vary one input across a list of values
    Sweep {
        #[command(flatten)]
        household: HouseholdArgs,

        /// Input to vary
        #[arg(long)]
        lever: LeverArg,

        /// Comma-separated values, e.g. 0.0,0.02,0.04
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LeverArg {
    NetReturn,
    Buffer,
    CostGrowth,
    Contribution,
    CostReduction,
}

impl From<LeverArg> for Lever {
    fn from(arg: LeverArg) -> Self {
        match arg {
            LeverArg::NetReturn => Lever::NetReturnRate,
            LeverArg::Buffer => Lever::BufferRate,
            LeverArg::CostGrowth => Lever::CostGrowthRate,
            LeverArg::Contribution => Lever::AnnualContribution,
            LeverArg::CostReduction => Lever::CostReductionFactor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EpisodeArg {
    One,
    Two,
}

/// Household inputs; anything omitted keeps the wizard default
#[derive(Debug, Args)]
struct HouseholdArgs {
    /// Four-digit birth year, used to derive the current age
    #[arg(long)]
    birth_year: Option<i32>,
    #[arg(long)]
    start_age: Option<u8>,
    #[arg(long)]
    current_pool: Option<f64>,
    #[arg(long)]
    annual_contribution: Option<f64>,
    #[arg(long)]
    contribution_years: Option<u32>,
    #[arg(long)]
    net_return: Option<f64>,
    #[arg(long)]
    annual_cost: Option<f64>,
    #[arg(long)]
    cost_growth: Option<f64>,
    #[arg(long)]
    duration_years: Option<u32>,
    #[arg(long)]
    episodes: Option<EpisodeArg>,
    #[arg(long)]
    gap_years: Option<u32>,
    #[arg(long)]
    buffer: Option<f64>,
    #[arg(long)]
    cost_reduction: Option<f64>,
    /// Annual contract benefit; enables the contract offset
    #[arg(long)]
    contract_benefit: Option<f64>,
    #[arg(long)]
    contract_years: Option<u32>,

    /// Clamp inputs into their ranges instead of rejecting them
    #[arg(long)]
    normalize: bool,
}

impl HouseholdArgs {
    fn apply(&self, defaults: &Household) -> Household {
        let mut h = defaults.clone();
        if let Some(year) = self.birth_year {
            h = h.with_birth_year(year, current_year());
        }
        if let Some(v) = self.start_age {
            h.start_age = v;
        }
        if let Some(v) = self.current_pool {
            h.current_pool = v;
        }
        if let Some(v) = self.annual_contribution {
            h.annual_contribution = v;
        }
        if let Some(v) = self.contribution_years {
            h.contribution_years = v;
        }
        if let Some(v) = self.net_return {
            h.net_return_rate = v;
        }
        if let Some(v) = self.annual_cost {
            h.annual_cost_today = v;
        }
        if let Some(v) = self.cost_growth {
            h.cost_growth_rate = v;
        }
        if let Some(v) = self.duration_years {
            h.duration_years = v;
        }
        if let Some(v) = self.episodes {
            h.episode_structure = match v {
                EpisodeArg::One => EpisodeStructure::One,
                EpisodeArg::Two => EpisodeStructure::Two,
            };
        }
        if let Some(v) = self.gap_years {
            h.gap_years = v;
        }
        if let Some(v) = self.buffer {
            h.buffer_rate = v;
        }
        if let Some(v) = self.cost_reduction {
            h.cost_reduction_factor = v;
        }
        if let Some(v) = self.contract_benefit {
            h.has_contract = true;
            h.annual_contract_benefit = v;
        }
        if let Some(v) = self.contract_years {
            h.contract_benefit_years = v;
        }
        h
    }

    fn config(&self) -> StressTestConfig {
        StressTestConfig {
            normalize_inputs: self.normalize,
            ..StressTestConfig::default()
        }
    }
}

fn load_assumptions(dir: Option<&PathBuf>) -> Result<Assumptions> {
    match dir {
        Some(path) => Assumptions::from_csv_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display())),
        None => Ok(Assumptions::default_planning()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(cli.assumptions.as_ref())?;
    let defaults = assumptions.defaults.clone();
    let runner = ScenarioRunner::with_assumptions(assumptions);

    match cli.command {
        Commands::Run { household, ledger_csv } => {
            let input = household.apply(&defaults);
            let result = runner
                .run(&input, household.config())
                .context("Stress test rejected the inputs")?;

            match cli.output {
                OutputFormat::Table => {
                    print!("{}", summary_text(&result));
                    println!();
                    print!("{}", ledger_table(&result.depletion.ledger));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Csv => {
                    write_ledger_csv(std::io::stdout(), &result.depletion.ledger)?;
                }
            }

            if let Some(path) = ledger_csv {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_ledger_csv(file, &result.depletion.ledger)?;
                log::info!("Ledger written to {}", path.display());
            }
        }
        Commands::Sweep { household, lever, values } => {
            let input = household.apply(&defaults);
            let lever = Lever::from(lever);
            let points = runner
                .run_sensitivity(&input, lever, &values)
                .context("Sweep rejected one of the values")?;

            match cli.output {
                OutputFormat::Table => {
                    println!(
                        "{:>10} {:>14} {:>10} {:>8} {:>14} {:>14}",
                        "Value", "PoolAtStart", "Shortfall", "Covered", "EndBalance", "Gap"
                    );
                    println!("{}", "-".repeat(76));
                    for p in &points {
                        println!(
                            "{:>10} {:>14} {:>10} {:>8} {:>14} {:>14}",
                            format_value(lever, p.value),
                            format_currency(p.pool_at_start),
                            p.first_shortfall_year
                                .map(|y| y.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                            p.years_fully_covered,
                            format_currency(p.ending_balance),
                            format_currency(p.gap),
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&points)?);
                }
                OutputFormat::Csv => {
                    let mut wtr = csv::Writer::from_writer(std::io::stdout());
                    for p in &points {
                        wtr.serialize(p)?;
                    }
                    wtr.flush()?;
                }
            }
        }
    }

    Ok(())
}

fn format_value(lever: Lever, value: f64) -> String {
    match lever {
        Lever::AnnualContribution => format_currency(value),
        Lever::CostReductionFactor => format!("{:.2}", value),
        _ => format_pct(value),
    }
}
