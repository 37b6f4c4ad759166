use std::path::PathBuf;

use clap::Args;

use super::parse::parse_score_assignment;

#[derive(Args, Debug, Clone)]
pub struct RubricArgs {
    /// Also report rows that were skipped or repaired while parsing
    #[arg(long)]
    pub check: bool,
}

/// Scores given on the command line and/or in a score file
#[derive(Args, Debug, Clone, Default)]
pub struct ScoreArgs {
    /// Score for one criterion, as `<id>=<value>` (repeatable)
    #[arg(long = "score", short = 's', value_parser = parse_score_assignment, action = clap::ArgAction::Append)]
    pub score: Vec<(String, i64)>,

    /// JSON or YAML score file with `group` and `scores`
    #[arg(long)]
    pub scores: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Group (or student) name written into every row
    #[arg(long, short)]
    pub group: Option<String>,

    #[command(flatten)]
    pub scores: ScoreArgs,

    /// Output file, or directory to receive the default file name
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the CSV instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Group name to start with
    #[arg(long, short)]
    pub group: Option<String>,

    #[command(flatten)]
    pub scores: ScoreArgs,
}
