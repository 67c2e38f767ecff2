//! Wealth Simulator CLI
//!
//! Command-line interface for running wealth projections

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use wealth_simulator::expenses::{load_expenses, parse_expense_spec};
use wealth_simulator::params::{read_parameter_file, Allocation};
use wealth_simulator::projection::{ProjectionConfig, ProjectionEngine};
use wealth_simulator::report::{
    final_wealth_line, format_currency, period_line, write_csv, write_expense_table, write_json,
    write_table,
};
use wealth_simulator::session::Session;
use wealth_simulator::{ExpenseRegistry, Region, SimulationParameters};

/// Investment wealth simulator
#[derive(Parser)]
#[command(name = "wealth-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write the log to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single projection and print the result
    Project {
        #[command(flatten)]
        params: ParamArgs,

        /// One-off expense as NAME,AMOUNT,DATE (repeatable)
        #[arg(short, long, value_name = "NAME,AMOUNT,DATE")]
        expense: Vec<String>,

        /// CSV file with Name,Amount,Date columns
        #[arg(long, value_name = "CSV")]
        expenses: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show one row per year instead of per month (table format)
        #[arg(long)]
        yearly: bool,

        /// Include the monthly breakdown (contribution, growth, expenses)
        #[arg(long)]
        detailed: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start an interactive session to manage expenses and re-run projections
    Session {
        #[command(flatten)]
        params: ParamArgs,

        /// CSV file with Name,Amount,Date columns to preload
        #[arg(long, value_name = "CSV")]
        expenses: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Simulation inputs; flags override the parameter file, which overrides the region preset
///
/// An explicit `--region` replaces the file's `region` before the file is resolved.
#[derive(Args)]
struct ParamArgs {
    /// Region for default allocation and returns (us, europe, global) [default: us]
    #[arg(long)]
    region: Option<Region>,

    /// JSON parameter file
    #[arg(long)]
    params: Option<PathBuf>,

    /// Starting wealth
    #[arg(long)]
    starting_wealth: Option<f64>,

    /// Monthly savings
    #[arg(long)]
    monthly_savings: Option<f64>,

    /// Equity allocation in percent; bonds take the remainder
    #[arg(long)]
    equity_pct: Option<f64>,

    /// Annual return on equities (%)
    #[arg(long)]
    equity_return: Option<f64>,

    /// Annual return on bonds (%)
    #[arg(long)]
    bond_return: Option<f64>,

    /// Annual inflation rate (%)
    #[arg(long)]
    inflation: Option<f64>,

    /// Simulation duration in years (1-50)
    #[arg(long)]
    years: Option<u32>,

    /// Simulation start date (YYYY-MM-DD, default today)
    #[arg(long)]
    start_date: Option<NaiveDate>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<SimulationParameters> {
        let today = Local::now().date_naive();

        let mut params = match &self.params {
            Some(path) => {
                let mut file = read_parameter_file(path)
                    .with_context(|| format!("Failed to load parameters from {}", path.display()))?;
                if let Some(region) = self.region {
                    file.region = region;
                }
                file.into_parameters(today)
                    .with_context(|| format!("Invalid parameters in {}", path.display()))?
            }
            None => SimulationParameters::for_region(self.region.unwrap_or_default(), today),
        };

        if let Some(date) = self.start_date {
            params.start_date = date;
        }
        if let Some(v) = self.starting_wealth {
            params.starting_wealth = v;
        }
        if let Some(v) = self.monthly_savings {
            params.monthly_contribution = v;
        }
        if let Some(v) = self.equity_pct {
            params.allocation = Allocation::from_equity(v)?;
        }
        if let Some(v) = self.equity_return {
            params.annual_equity_return = v;
        }
        if let Some(v) = self.bond_return {
            params.annual_bond_return = v;
        }
        if let Some(v) = self.inflation {
            params.annual_inflation = v;
        }
        if let Some(v) = self.years {
            params.duration_years = v;
        }

        params.validate().context("Invalid simulation parameters")?;
        Ok(params)
    }
}

fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let default_level = if verbose { "debug" } else if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn build_registry(
    params: &SimulationParameters,
    specs: &[String],
    file: Option<&PathBuf>,
) -> Result<ExpenseRegistry> {
    let mut registry = ExpenseRegistry::new(params.start_date);

    if let Some(path) = file {
        let added = load_expenses(path, &mut registry)
            .with_context(|| format!("Failed to load expenses from {}", path.display()))?;
        info!("Loaded {} expenses from {}", added, path.display());
    }

    for spec in specs {
        let (name, amount, date) = parse_expense_spec(spec)?;
        registry.add(name, amount, date)?;
    }

    Ok(registry)
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Commands::Project {
            params,
            expense,
            expenses,
            format,
            yearly,
            detailed,
            output,
        } => {
            let params = params.resolve()?;
            let registry = build_registry(&params, &expense, expenses.as_ref())?;

            let engine = ProjectionEngine::new(params.clone(), ProjectionConfig { detailed_output: detailed });
            let series = engine.project(&registry.snapshot());

            let mut out = open_output(output.as_ref())?;
            match format {
                OutputFormat::Table => {
                    writeln!(out, "{}", period_line(&params))?;
                    writeln!(
                        out,
                        "Allocation: {}% equities / {}% bonds, starting wealth {}, monthly savings {}",
                        params.allocation.equity_pct,
                        params.allocation.bond_pct,
                        format_currency(params.starting_wealth),
                        format_currency(params.monthly_contribution),
                    )?;
                    writeln!(out)?;
                    write_expense_table(&mut out, registry.as_slice())?;
                    writeln!(out)?;
                    write_table(&mut out, &series, yearly)?;
                    writeln!(out)?;
                    writeln!(out, "{}", final_wealth_line(&params, &series))?;
                    if let Some(point) = series.summary().first_negative {
                        writeln!(out, "Warning: wealth turns negative on {}", point.date)?;
                    }
                }
                OutputFormat::Csv => write_csv(&mut out, &series)?,
                OutputFormat::Json => {
                    write_json(&mut out, &params, registry.as_slice(), &series)?;
                    writeln!(out)?;
                }
            }
            out.flush()?;
            info!("User completed simulation.");
        }

        Commands::Session { params, expenses } => {
            let params = params.resolve()?;
            let registry = build_registry(&params, &[], expenses.as_ref())?;

            let mut session = Session::with_registry(params, registry)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session.run(stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(args: &[&str]) -> SimulationParameters {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Project { params, .. } | Commands::Session { params, .. } => {
                params.resolve().unwrap()
            }
        }
    }

    #[test]
    fn test_expense_flags() {
        let cli = Cli::try_parse_from([
            "wealth-sim",
            "project",
            "--expense",
            "Car,1000,2030-01-01",
            "-e",
            "Boat,500,2031-01-01",
            "--expenses",
            "expenses.csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Project { expense, expenses, .. } => {
                assert_eq!(expense, ["Car,1000,2030-01-01", "Boat,500,2031-01-01"]);
                assert_eq!(expenses, Some(PathBuf::from("expenses.csv")));
            }
            Commands::Session { .. } => panic!("expected project"),
        }
    }

    #[test]
    fn test_region_defaults_to_us() {
        let params = resolve(&["wealth-sim", "project", "--start-date", "2024-01-01"]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(params, SimulationParameters::for_region(Region::Us, start));
    }

    #[test]
    fn test_region_flag_overrides_parameter_file() {
        let path = std::env::temp_dir().join(format!("wealth-sim-params-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "region": "us", "starting_wealth": 250000 }"#).unwrap();
        let path_arg = path.to_str().unwrap();

        let from_file = resolve(&["wealth-sim", "project", "--params", path_arg]);
        assert_eq!(from_file.annual_equity_return, 7.0);

        let overridden =
            resolve(&["wealth-sim", "project", "--params", path_arg, "--region", "europe"]);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(overridden.starting_wealth, 250_000.0);
        assert_eq!(overridden.annual_equity_return, 6.0);
        assert_eq!(overridden.allocation, Allocation { equity_pct: 60.0, bond_pct: 40.0 });
    }
}
