//! Command-line argument definitions for the aero-ts tool
//!
//! The tool inspects filter pipelines without reading observation data:
//! it lists the registered filters, checks pipeline configurations and
//! validates exclude files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the timeseries filter tool
#[derive(Debug, Clone, Parser)]
#[command(
    name = "aero-ts",
    version,
    about = "Inspect and validate filter pipelines for atmospheric timeseries",
    long_about = "Lists the filters available to timeseries readers, resolves pipeline \
                  configurations into their normalised filter arguments and validates \
                  time/variable/station exclude files before they are used."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List registered filters and their default arguments
    Filters(FiltersArgs),
    /// Resolve a pipeline configuration and print the normalised filters
    Check(CheckArgs),
    /// Validate a time/variable/station exclude file
    Exclusions(ExclusionsArgs),
}

/// Arguments for the filters command
#[derive(Debug, Clone, Parser)]
pub struct FiltersArgs {
    /// Print the listing as one JSON object
    #[arg(long = "json", help = "Print filters and default arguments as JSON")]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Pipeline configuration file (JSON)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the exclusions command
#[derive(Debug, Clone, Parser)]
pub struct ExclusionsArgs {
    /// Exclude file, one `start, end, variable, station` entry per line
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Print every exclusion, not only the summary
    #[arg(long = "show", help = "Print every exclusion")]
    pub show: bool,
}

impl Args {
    /// Name of the selected subcommand
    pub fn command_name(&self) -> &'static str {
        match self.command {
            Commands::Filters(_) => "filters",
            Commands::Check(_) => "check",
            Commands::Exclusions(_) => "exclusions",
        }
    }

    /// Log level from the flags, falling back to `configured`
    ///
    /// `-q` wins over everything, any `-v` wins over the configured level.
    pub fn get_log_level(&self, configured: Option<&str>) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => configured
                .unwrap_or(crate::constants::DEFAULT_LOG_LEVEL)
                .to_ascii_lowercase(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}
