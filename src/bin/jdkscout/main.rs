//! jdkscout CLI - Discover, rank and select installed JDKs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jdkscout=debug")
    } else {
        EnvFilter::new("jdkscout=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Discover(args) => commands::discover::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Select(args) => commands::select::execute(args),
        Commands::Add(args) => commands::add::execute(args),
        Commands::Cache(args) => commands::cache::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
