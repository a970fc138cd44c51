//! engcalc: engineering calculations from the command line.
//!
//! Parses and formats values in engineering notation, sizes crystal load
//! capacitors and runs the signal utilities on `x,y` CSV datasets.

mod commands;
mod config;
mod dataset;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lib_dsp::unstair::UnstairMethod;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "engcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse values such as 1.5kΩ or 20 ppm into base units
    Parse {
        /// Values to parse
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Format a value with an SI prefix
    Format {
        /// Value to format, in engineering notation or as a plain number
        value: String,

        /// Unit to append (defaults to the unit in the value)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Crystal oscillator calculations
    Crystal {
        #[command(subcommand)]
        command: CrystalCommand,
    },

    /// Remove stairs from a quantized x,y dataset
    Unstair {
        /// CSV file with x and y columns
        input: PathBuf,

        /// Which sample of each stair to keep [default: from config, else left]
        #[arg(short, long)]
        method: Option<UnstairMethod>,

        /// Maximum difference between samples on the same stair
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Write the reduced dataset to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find the polynomial degree that best fits an x,y dataset
    Polyfit {
        /// CSV file with x and y columns
        input: PathBuf,

        /// Lowest degree to try
        #[arg(long)]
        min_degree: Option<usize>,

        /// Highest degree to try
        #[arg(long)]
        max_degree: Option<usize>,
    },
}

#[derive(Subcommand)]
enum CrystalCommand {
    /// Load capacitor value for a crystal's specified load capacitance
    LoadCaps {
        /// Load capacitance from the crystal datasheet, e.g. "12.5 pF"
        cload: String,

        /// Pin capacitance of the oscillator IC
        #[arg(long)]
        cpin: Option<String>,

        /// Stray capacitance of the board
        #[arg(long)]
        cstray: Option<String>,
    },

    /// Load capacitance resulting from a given load capacitor value
    ActualLoad {
        /// Capacitor on each crystal pin, e.g. "18 pF"
        cext: String,

        #[arg(long)]
        cpin: Option<String>,

        #[arg(long)]
        cstray: Option<String>,
    },

    /// Clock drift caused by a frequency deviation
    Deviation {
        /// Frequency deviation, e.g. "20 ppm"
        ppm: String,

        /// Timespan in seconds, or "day" / "year"
        #[arg(default_value = "day")]
        timespan: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = config::load_or_default(cli.config.as_deref())?;

    let table = match cli.command {
        Commands::Parse { values } => commands::parse_values(&config.engineer_io()?, &values)?,
        Commands::Format { value, unit } => {
            commands::format_value(&config.engineer_io()?, &value, unit.as_deref())?
        }
        Commands::Crystal { command } => run_crystal(command, &config.crystal)?,
        Commands::Unstair {
            input,
            method,
            tolerance,
            output,
        } => {
            let data = dataset::read_xy_csv(&input)?;
            let method = method.unwrap_or(config.unstair.method);
            let tolerance = tolerance.unwrap_or(config.unstair.tolerance);
            let reduced = commands::unstair_dataset(&data, method, tolerance)?;
            match output {
                Some(path) => {
                    dataset::write_xy_csv(&path, &reduced.x, &reduced.y)?;
                    return Ok(());
                }
                None => commands::dataset_table(&reduced),
            }
        }
        Commands::Polyfit {
            input,
            min_degree,
            max_degree,
        } => {
            let data = dataset::read_xy_csv(&input)?;
            let mut options = config.polyfit;
            options.min_degree = min_degree.unwrap_or(options.min_degree);
            options.max_degree = max_degree.unwrap_or(options.max_degree);
            commands::polyfit_dataset(&data, &options)?
        }
    };

    table.print(cli.format)
}

fn run_crystal(command: CrystalCommand, defaults: &config::CrystalConfig) -> Result<output::Table> {
    let parasitics = |cpin: Option<String>, cstray: Option<String>| config::CrystalConfig {
        pin_capacitance: cpin.unwrap_or_else(|| defaults.pin_capacitance.clone()),
        stray_capacitance: cstray.unwrap_or_else(|| defaults.stray_capacitance.clone()),
    };

    match command {
        CrystalCommand::LoadCaps { cload, cpin, cstray } => {
            commands::crystal_load_caps(&cload, &parasitics(cpin, cstray))
        }
        CrystalCommand::ActualLoad { cext, cpin, cstray } => {
            commands::crystal_actual_load(&cext, &parasitics(cpin, cstray))
        }
        CrystalCommand::Deviation { ppm, timespan } => commands::crystal_deviation(&ppm, &timespan),
    }
}
