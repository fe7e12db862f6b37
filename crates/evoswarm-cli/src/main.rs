//! evoswarm CLI - headless driver for evoswarm simulations.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evoswarm")]
#[command(author, version, long_about = None)]
#[command(about = "evoswarm - real-time evolution of genome-steered agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default evoswarm.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the simulation headless
    Run {
        /// Number of ticks to run
        #[arg(short, long, default_value = "5000")]
        ticks: u64,

        /// Canvas width (overrides evoswarm.toml)
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height (overrides evoswarm.toml)
        #[arg(long)]
        height: Option<f64>,

        /// RNG seed (overrides evoswarm.toml)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the final snapshot as JSON to this file
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            ticks,
            width,
            height,
            seed,
            output,
        } => commands::run::run(
            commands::run::RunOptions {
                ticks,
                width,
                height,
                seed,
                output,
            },
            cli.verbose,
        ),
    }
}
