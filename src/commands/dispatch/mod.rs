//! Command dispatch logic for grille

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::Cli;
use grille_core::config::GrilleConfig;
use grille_core::error::Result;
use tracing::debug;

mod command;
mod macros;

pub use command::CommandContext;
use command::{Command, NoCommand};
pub(crate) use macros::trace_command;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path(cli.root.clone());
    debug!(elapsed = ?start.elapsed(), "resolve_root");

    let config = GrilleConfig::discover(cli.config.as_deref(), &root)?;
    trace_command!(cli, start, "load_config");

    let ctx = CommandContext::new(cli, &root, config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
