//! # ralg CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the engine and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ralg_cli::generate::{run_generate, GenerateArgs};
use ralg_cli::load_engine;
use ralg_cli::resolve::{run_resolve, ResolveArgs};
use ralg_cli::structures::{run_structures, StructuresArgs};
use ralg_cli::tables::{run_tables, TablesArgs};

/// Tensor algebra on CJKV radicals.
///
/// Combines every radical of a set with every other, rank times over, and
/// looks up the compound character each ordered combination forms.
#[derive(Parser, Debug)]
#[command(name = "ralg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to an engine configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a composition tensor over a radical set.
    Generate(GenerateArgs),

    /// Resolve one ordered tuple of radicals.
    Resolve(ResolveArgs),

    /// Count IDS structures, optionally matching them against the index.
    Structures(StructuresArgs),

    /// Show versions, sizes and digests of the loaded tables.
    Tables(TablesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ralg starting");

    let result = load_engine(cli.config.as_deref()).and_then(|engine| match &cli.command {
        Commands::Generate(args) => run_generate(args, &engine),
        Commands::Resolve(args) => run_resolve(args, &engine),
        Commands::Structures(args) => run_structures(args, &engine),
        Commands::Tables(args) => run_tables(args, &engine),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
