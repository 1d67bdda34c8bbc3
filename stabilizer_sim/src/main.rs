// stabilizer_sim/src/main.rs

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stabilizer_sim::cli::Cli;
use stabilizer_sim::simulation::config::{load_scenario, ScenarioConfig};
use stabilizer_sim::simulation::report::{format_summary, write_csv};
use stabilizer_sim::simulation::runner::{summarize, ScenarioRunner};

fn init_logging(quiet: bool) {
    // A good filter for focusing on our crate's logs during development.
    let default_filter = if quiet {
        "warn"
    } else {
        "info,stabilizer_sim=info,stabilizer_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if cli.dump_default {
        let toml = toml::to_string_pretty(&ScenarioConfig::default())
            .context("Failed to serialize the default scenario")?;
        print!("{toml}");
        return Ok(());
    }

    // --- 1. Load Scenario Configuration ---
    let mut config = load_scenario(&cli.scenario)?;
    if let Some(steps) = cli.steps {
        config.simulation.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    let name = config.simulation.name.clone();
    let settle_steps = config.simulation.settle_steps;

    // --- 2. Run ---
    let mut runner = ScenarioRunner::new(config)?;
    let records = runner.run()?;
    let measured = runner.stabilizer().measurement_layout();

    // --- 3. Report ---
    if !cli.summary_only {
        match &cli.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Could not create {}", path.display()))?;
                write_csv(BufWriter::new(file), measured, &records)?;
                info!("Wrote {} cycles to {}", records.len(), path.display());
            }
            None => write_csv(io::stdout().lock(), measured, &records)?,
        }
    }

    let summary = summarize(&records, settle_steps);
    eprintln!("{}", format_summary(&name, &summary));
    Ok(())
}
