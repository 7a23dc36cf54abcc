//! Compendium CLI: builds compendium and synonym files from a YAML config.
//!
//! Usage:
//!   compendium build --config build.yaml [--verbose] [--json]
//!   compendium check --config build.yaml

use clap::{Parser, Subcommand};
use compendium::{BuildConfig, CompendiumBuilder, RunReport};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "compendium",
    version,
    about = "Biomedical identifier clique and compendium builder"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge, type and write every configured compendium
    Build {
        /// Path to the YAML build config
        #[arg(long)]
        config: PathBuf,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a config and its Biolink model without reading inputs
    Check {
        /// Path to the YAML build config
        #[arg(long)]
        config: PathBuf,
    },
}

fn load_config(path: &Path) -> Result<BuildConfig, i32> {
    BuildConfig::load(path).map_err(|e| {
        eprintln!("Error: {}: {}", path.display(), e);
        1
    })
}

fn cmd_build(path: &Path, json: bool) -> i32 {
    let config = match load_config(path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match CompendiumBuilder::build(&config) {
        Ok(report) if json => match serde_json::to_string_pretty(&report) {
            Ok(s) => {
                println!("{}", s);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Ok(report) => {
            print_report(&report);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_check(path: &Path) -> i32 {
    let config = match load_config(path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let checked = config
        .biolink_model()
        .and_then(|model| config.normalizer(&model).map(|_| ()));
    match checked {
        Ok(()) => {
            for def in &config.compendia {
                println!(
                    "{}: {} identifier file(s), {} concord(s)",
                    def.name,
                    def.identifier_files.len(),
                    def.concords.len()
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_report(report: &RunReport) {
    println!(
        "{:<20}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
        "COMPENDIUM", "CLIQUES", "RECORDS", "SYNONYMS", "REJECTED", "DROPPED"
    );
    println!("{}", "-".repeat(70));
    for c in &report.compendia {
        println!(
            "{:<20}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            c.name,
            c.cliques,
            c.records,
            c.synonym_records,
            c.merge.rejected(),
            c.unassembled
        );
    }
    println!(
        "finished in {} ms",
        (report.finished_at - report.started_at).num_milliseconds()
    );
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let code = match cli.command {
        Commands::Build { config, json } => cmd_build(&config, json),
        Commands::Check { config } => cmd_check(&config),
    };
    std::process::exit(code);
}
