mod config;
mod pipeline;
mod reader;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use config::GenerationConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generates a tree of synthetic SS-MIX2 HL7 v2.5 messages from tabular
/// patient, admission, order and lab-test input.
#[derive(Parser)]
#[command(name = "ssmix-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing patients.csv, admissions.csv, orders.csv,
    /// lab_tests.csv, observations.csv and specimens.csv
    #[arg(long, value_name = "DIR")]
    source_dir: PathBuf,

    /// Directory the ssmixtwins/ tree is written under
    #[arg(long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Maximum number of patient slices written concurrently
    #[arg(long, default_value_t = 4)]
    max_workers: usize,

    /// Skip the pre-generation validation sweep; entity construction still
    /// runs but aborts the whole run at its first failure
    #[arg(long)]
    already_validated: bool,

    /// Deterministic seed driving every synthesized name, address and phone
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = GenerationConfig {
        source_dir: cli.source_dir,
        output_dir: cli.output_dir,
        max_workers: cli.max_workers.max(1),
        already_validated: cli.already_validated,
        seed: cli.seed,
    };

    let outcome = pipeline::run(&config).await?;

    if outcome.validation_failed {
        eprintln!("{}", "Validation failed; see validation_errors.json".red().bold());
        std::process::exit(1);
    }

    let storage = outcome.storage.expect("storage outcome present when validation passes");

    println!(
        "{} {} patients written",
        "✓".green().bold(),
        storage.completed_patients.len().to_string().cyan()
    );

    if !storage.failures.is_empty() {
        eprintln!("{}", format!("{} patient slices failed to write:", storage.failures.len()).red().bold());
        for failure in &storage.failures {
            eprintln!("  {} - {}", failure.patient_id.yellow(), failure.error);
        }
        std::process::exit(1);
    }

    if storage.cancelled {
        eprintln!("{}", "Run was cancelled before completion".red().bold());
        std::process::exit(1);
    }

    Ok(())
}
