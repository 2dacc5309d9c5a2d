use aero_timeseries::cli::{args::Args, commands};
use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let command = args.command_name();
    commands::run(args).with_context(|| format!("{} failed", command))
}
