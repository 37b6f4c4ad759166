//! `grille summary` - totals and per-category breakdown for a set of scores

use std::io::{self, Write};

use super::dispatch::CommandContext;
use super::render::{summary_json, write_summary_human, write_summary_records};
use crate::cli::format::output_by_format;
use crate::cli::ScoreArgs;
use grille_core::error::Result;

pub fn execute(ctx: &CommandContext, args: &ScoreArgs) -> Result<()> {
    let session = ctx.load_session(args, None)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    output_by_format!(ctx.format(),
        json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&summary_json(&session))?)?;
        },
        human => {
            write_summary_human(&mut out, &session)?;
        },
        records => {
            write_summary_records(&mut out, &session)?;
        }
    );
    Ok(())
}
