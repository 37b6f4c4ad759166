//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::paths::resolve_against;
use crate::cli::{Cli, Commands, OutputFormat, ScoreArgs};
use crate::commands;
use grille_core::config::GrilleConfig;
use grille_core::error::Result;
use grille_core::rubric::{RubricParse, RubricSource};
use grille_core::session::Session;
use grille_core::sheet::ScoreSheet;

use super::trace_command;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub config: GrilleConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, config: GrilleConfig, start: Instant) -> Self {
        Self {
            cli,
            root,
            config,
            start,
        }
    }

    /// `--format`, then the configured default, then human
    pub fn format(&self) -> OutputFormat {
        self.cli
            .format
            .or(self.config.default_format)
            .unwrap_or_default()
    }

    pub fn rubric_source(&self) -> RubricSource {
        let cli_path = self
            .cli
            .rubric
            .as_deref()
            .map(|path| resolve_against(self.root, path));
        RubricSource::resolve(cli_path, self.config.rubric.clone())
    }

    pub fn load_rubric(&self) -> Result<RubricParse> {
        let parse = self.rubric_source().load()?;
        trace_command!(self.cli, self.start, "load_rubric");
        Ok(parse)
    }

    /// Load the rubric and apply the score file, `--score` flags and group name
    pub fn load_session(&self, scores: &ScoreArgs, group: Option<&str>) -> Result<Session> {
        let mut session = Session::new(self.load_rubric()?.items);

        let mut sheet = match &scores.scores {
            Some(path) => ScoreSheet::load(&resolve_against(self.root, path))?,
            None => ScoreSheet::default(),
        };
        sheet.merge(ScoreSheet {
            group: group.map(str::to_string),
            scores: scores.score.iter().cloned().collect(),
        });
        sheet.apply(&mut session)?;

        trace_command!(self.cli, self.start, "load_session");
        Ok(session)
    }

    /// Directory receiving exports when no output path is given
    pub fn export_dir(&self) -> PathBuf {
        self.config
            .output_dir
            .clone()
            .unwrap_or_else(|| self.root.to_path_buf())
    }

    pub fn root(&self) -> &Path {
        self.root
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("grille {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Score a grading rubric and export the evaluation as CSV.");
        println!();
        println!("Run `grille --help` for usage information.");
        Ok(())
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Rubric(args) => commands::rubric::execute(ctx, args),
            Commands::Summary(args) => commands::summary::execute(ctx, args),
            Commands::Export(args) => commands::export::execute(ctx, args),
            Commands::Evaluate(args) => commands::evaluate::execute(ctx, args),
        }
    }
}
