//! CLI argument parsing for grille
//!
//! Global flags: --root, --config, --rubric, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod format;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{EvaluateArgs, ExportArgs, RubricArgs, ScoreArgs};
pub use grille_core::format::OutputFormat;
use parse::parse_output_format;

/// Grille - score a rubric, review totals, export the evaluation as CSV
#[derive(Parser, Debug)]
#[command(name = "grille")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for config discovery and default exports
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit configuration file
    #[arg(long, global = true, env = "GRILLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Rubric CSV file (defaults to the built-in rubric)
    #[arg(long, global = true)]
    pub rubric: Option<PathBuf>,

    /// Output format: human, json or records
    #[arg(long, global = true, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the rubric criteria grouped by category
    Rubric(RubricArgs),

    /// Show totals and the per-category breakdown for a set of scores
    Summary(ScoreArgs),

    /// Export an evaluation as CSV
    Export(ExportArgs),

    /// Score the rubric interactively
    Evaluate(EvaluateArgs),
}
