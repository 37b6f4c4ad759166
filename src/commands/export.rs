//! `grille export` - write the evaluation as a CSV file
//!
//! - The group name is required and may not be blank
//! - Output: `--output <file|dir>`, else the configured `output_dir`, else
//!   the root directory; `--stdout` prints the CSV instead
//! - Default file name: `Evaluation_<group>_<YYYY-MM-DD>.csv`

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde_json::json;
use tracing::{debug, info};

use super::dispatch::CommandContext;
use crate::cli::format::output_by_format;
use crate::cli::paths::resolve_against;
use crate::cli::ExportArgs;
use grille_core::error::{GradeError, Result};
use grille_core::format::escape_quotes;
use grille_core::session::Session;

/// Whitespace runs and path separators, replaced by `_` in file names
static FILENAME_UNSAFE: OnceLock<Option<Regex>> = OnceLock::new();

/// Default export file name for a group on a given day
pub fn export_filename(group_name: &str, date: NaiveDate) -> String {
    let group = match FILENAME_UNSAFE.get_or_init(|| Regex::new(r"[\s/\\]+").ok()) {
        Some(re) => re.replace_all(group_name, "_").into_owned(),
        None => group_name.replace(' ', "_"),
    };
    format!("Evaluation_{}_{}.csv", group, date.format("%Y-%m-%d"))
}

/// An existing directory, or a path written with a trailing separator (`out/`)
fn names_directory(path: &Path) -> bool {
    path.is_dir()
        || path
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::is_separator)
}

/// Where the CSV goes: an explicit file, or the default name inside a directory
pub fn resolve_output_path(
    output: Option<&Path>,
    default_dir: &Path,
    group_name: &str,
    date: NaiveDate,
) -> PathBuf {
    match output {
        Some(path) if names_directory(path) => path.join(export_filename(group_name, date)),
        Some(path) => path.to_path_buf(),
        None => default_dir.join(export_filename(group_name, date)),
    }
}

/// Write the session's CSV to `path`, creating parent directories as needed
pub fn write_export(session: &Session, path: &Path) -> Result<usize> {
    let csv = session.export_csv()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| GradeError::io_operation("create directory", parent.display(), e))?;
    }
    fs::write(path, &csv)
        .map_err(|e| GradeError::io_operation("write export", path.display(), e))?;

    let rows = session.items().len();
    info!(path = %path.display(), rows, "evaluation exported");
    Ok(rows)
}

pub fn execute(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
    let session = ctx.load_session(&args.scores, args.group.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.stdout {
        let csv = session.export_csv()?;
        writeln!(out, "{}", csv)?;
        return Ok(());
    }

    let output = args
        .output
        .as_deref()
        .map(|path| resolve_against(ctx.root(), path));
    let path = resolve_output_path(
        output.as_deref(),
        &ctx.export_dir(),
        session.group_name(),
        Local::now().date_naive(),
    );
    debug!(path = %path.display(), "export_target");

    let rows = write_export(&session, &path)?;

    output_by_format!(ctx.format(),
        json => {
            let value = json!({
                "status": "exported",
                "path": path.display().to_string(),
                "group": session.group_name(),
                "rows": rows,
                "total_score": session.total_score(),
                "total_max": session.total_max(),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
        human => {
            if !ctx.cli.quiet {
                writeln!(
                    out,
                    "Exported {} criteria ({}/{}) to {}",
                    rows,
                    session.total_score(),
                    session.total_max(),
                    path.display()
                )?;
            }
        },
        records => {
            writeln!(
                out,
                "H grille={} mode=export path=\"{}\" rows={} total={} max={}",
                env!("CARGO_PKG_VERSION"),
                escape_quotes(&path.display().to_string()),
                rows,
                session.total_score(),
                session.total_max()
            )?;
        }
    );
    Ok(())
}
