//! Run the simulation headless.

use anyhow::{Context, Result};
use colored::Colorize;
use evoswarm::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::config::Config;

/// Command-line overrides for a run.
pub struct RunOptions {
    pub ticks: u64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub seed: Option<u64>,
    pub output: Option<String>,
}

pub fn run(options: RunOptions, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let width = options.width.unwrap_or(config.canvas.width);
    let height = options.height.unwrap_or(config.canvas.height);
    let mut sim_config = config.simulation;
    if let Some(seed) = options.seed {
        sim_config.seed = Some(seed);
    }

    tracing::debug!(width, height, ticks = options.ticks, seed = ?sim_config.seed, "starting run");
    let mut sim = Simulation::new(sim_config, width, height)
        .context("Failed to create simulation")?;

    println!(
        "{} Running {} agents for {} ticks on {}x{} (seed {})",
        "→".blue(),
        sim.agents().len().to_string().cyan(),
        options.ticks.to_string().cyan(),
        width,
        height,
        sim.seed().to_string().cyan()
    );

    let pb = ProgressBar::new(options.ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    for _ in 0..options.ticks {
        let generation = sim.generation();
        sim.advance(width, height);
        if verbose && sim.generation() != generation {
            if let Some(report) = sim.last_report() {
                pb.println(format_report(report));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    let stats = sim.stats();
    println!(
        "  Ticks: {}  Generations: {}  Currently hit: {}",
        stats.total_ticks.to_string().green(),
        stats.generation.to_string().green(),
        stats.agents_hit.to_string().yellow()
    );

    let table = summary_table(sim.history(), verbose);
    if !table.is_empty() {
        println!();
        println!("{}", "Generations:".bold());
        for line in table {
            println!("{}", line);
        }
    }

    if let Some(output) = options.output {
        write_snapshot(&sim, Path::new(&output))?;
        println!();
        println!("  {} Snapshot written to {}", "✓".green(), output);
    }

    Ok(())
}

/// Report lines for the end-of-run table. Verbose runs already printed
/// each report as it completed.
fn summary_table(history: &[GenerationReport], verbose: bool) -> Vec<String> {
    if verbose {
        return Vec::new();
    }
    history.iter().map(format_report).collect()
}

fn format_report(report: &GenerationReport) -> String {
    format!(
        "  gen {:>4}  best {:>9.2}  mean {:>9.2}  worst {:>9.2}  hits {:>6}  \
         divergence {:>7.3}  sensing {:>6.2}",
        report.generation,
        report.best_fitness,
        report.mean_fitness,
        report.worst_fitness,
        report.hits,
        report.genome_divergence,
        report.mean_sensing_radius
    )
}

fn write_snapshot(sim: &Simulation, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(&sim.snapshot()).context("Failed to serialize snapshot")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
