//! Command implementations for the aero-ts CLI
//!
//! Each command sets up logging, does its work against a freshly built
//! filter registry and prints a human-readable report to stdout.

use crate::app::services::filters::{
    Configurable, Filter, FilterChain, FilterFactory, Kwargs, TimeVariableStationArgs,
    TimeVariableStationFilter, read_exclude_file,
};
use crate::cli::args::{Args, CheckArgs, Commands, ExclusionsArgs, FiltersArgs};
use crate::config::PipelineConfig;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use colored::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Main command runner
///
/// Dispatches to the subcommand handler. The `check` command reads its
/// configuration before logging starts so the configured level applies.
pub fn run(args: Args) -> Result<()> {
    match &args.command {
        Commands::Filters(filters_args) => {
            setup_logging(&args.get_log_level(None))?;
            run_filters(filters_args)
        }
        Commands::Check(check_args) => {
            let config = PipelineConfig::from_json_file(&check_args.config)?;
            setup_logging(&args.get_log_level(Some(&config.log_level)))?;
            run_check(check_args, &config)
        }
        Commands::Exclusions(exclusions_args) => {
            setup_logging(&args.get_log_level(None))?;
            run_exclusions(exclusions_args)
        }
    }
}

/// Install the stderr subscriber
///
/// `RUST_LOG` overrides the level given here.
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("cannot initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Default arguments of every registered filter, in registration order
pub fn filter_listing(factory: &FilterFactory) -> Result<Vec<(String, Kwargs)>> {
    factory
        .names()
        .iter()
        .map(|name| {
            let filter = factory.get(name, &Kwargs::Null)?;
            Ok((name.clone(), filter.init_kwargs()))
        })
        .collect()
}

fn run_filters(args: &FiltersArgs) -> Result<()> {
    let factory = FilterFactory::with_builtins();
    let listing = filter_listing(&factory)?;

    if args.json {
        let object: serde_json::Map<String, Kwargs> = listing.into_iter().collect();
        let text = serde_json::to_string_pretty(&object)?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", "Available filters:".bright_green().bold());
    for (i, (name, kwargs)) in listing.iter().enumerate() {
        println!(
            "  {}. {} {}",
            (i + 1).to_string().bright_yellow().bold(),
            name.bold(),
            kwargs.to_string().dimmed()
        );
    }
    Ok(())
}

/// Lines describing each filter of a resolved chain
pub fn describe_chain(chain: &FilterChain) -> Vec<String> {
    let mut lines = Vec::with_capacity(chain.len());
    for (i, filter) in chain.filters().iter().enumerate() {
        let mut line = format!("{}. {} {}", i + 1, filter.name(), filter.init_kwargs());
        if let Some(envelope) = filter.as_time_bounds().and_then(|tb| tb.envelope().ok()) {
            line.push_str(&format!(" (envelope {} .. {})", envelope.0, envelope.1));
        }
        lines.push(line);
    }
    lines
}

fn run_check(args: &CheckArgs, config: &PipelineConfig) -> Result<()> {
    let factory = FilterFactory::with_builtins();
    let chain = config.resolve(&factory)?;
    info!(
        "Resolved {} filters from {}",
        chain.len(),
        args.config.display()
    );

    println!(
        "{} {}",
        "Pipeline".bright_green().bold(),
        args.config.display().to_string().bold()
    );
    println!("  log level: {}", config.log_level);
    if chain.is_empty() {
        println!("  {}", "no filters, data passes unchanged".yellow());
    }
    for line in describe_chain(&chain) {
        println!("  {}", line);
    }
    Ok(())
}

/// Number of exclusions per variable
pub fn exclusion_summary(filter: &TimeVariableStationFilter) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, _, variable, _) in filter.exclusions() {
        *counts.entry(variable.clone()).or_insert(0) += 1;
    }
    counts
}

fn run_exclusions(args: &ExclusionsArgs) -> Result<()> {
    let entries = read_exclude_file(&args.file)?;
    let filter = TimeVariableStationFilter::from_args(TimeVariableStationArgs {
        exclude: entries,
        exclude_from_csvfile: None,
    })?;

    println!(
        "{} {} exclusions in {}",
        "Valid:".bright_green().bold(),
        filter.exclusions().len(),
        args.file.display()
    );
    for (variable, count) in exclusion_summary(&filter) {
        println!("  {}: {}", variable.bold(), count);
    }

    if args.show {
        for (start, end, variable, station) in filter.exclusions() {
            println!("  {} .. {}  {} @ {}", start, end, variable, station);
        }
    }
    Ok(())
}
