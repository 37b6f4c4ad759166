//! `grille evaluate` - interactive scoring session
//!
//! Reads one command per line from stdin and updates a single `Session`.
//! Errors from a command (unknown criterion, blank group on export) are
//! reported and the session continues; only I/O failures end it.

use std::io::{self, BufRead, Lines, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use super::dispatch::CommandContext;
use super::export::{resolve_output_path, write_export};
use super::render::{write_item_human, write_summary_human};
use crate::cli::paths::resolve_against;
use crate::cli::EvaluateArgs;
use grille_core::{bail_invalid, bail_usage};
use grille_core::error::{GradeError, Result};
use grille_core::session::Session;
use grille_core::summary::category_label;

const HELP: &str = "\
Commands:
  list                 show every criterion with its score and level
  show <id>            show one criterion
  set <id> <score>     assign a score (clamped to 0..max)
  group [name]         show or set the group name
  summary              totals and per-category breakdown
  reset                set every score to 0 and clear the group name
  export [path]        write the CSV (file or directory)
  help                 this message
  quit                 leave the session";

pub fn execute(ctx: &CommandContext, args: &EvaluateArgs) -> Result<()> {
    let mut session = ctx.load_session(&args.scores, args.group.as_deref())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut evaluation = Evaluation::new(
        &mut session,
        ctx.root().to_path_buf(),
        ctx.export_dir(),
        ctx.cli.quiet,
    );
    evaluation.run(stdin.lock(), &mut out)
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a session
pub struct Evaluation<'a> {
    session: &'a mut Session,
    root: PathBuf,
    export_dir: PathBuf,
    quiet: bool,
}

impl<'a> Evaluation<'a> {
    pub fn new(session: &'a mut Session, root: PathBuf, export_dir: PathBuf, quiet: bool) -> Self {
        Self {
            session,
            root,
            export_dir,
            quiet,
        }
    }

    pub fn run<R: BufRead>(&mut self, input: R, out: &mut dyn Write) -> Result<()> {
        let mut lines = input.lines();

        if !self.quiet {
            writeln!(
                out,
                "{} criteria, {} points. Type `help` for commands.",
                self.session.items().len(),
                self.session.total_max()
            )?;
        }

        loop {
            self.prompt(out, "> ")?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.handle(line.trim(), &mut lines, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(GradeError::Io(e)) => return Err(GradeError::Io(e)),
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }

        debug!(total = self.session.total_score(), "evaluation ended");
        Ok(())
    }

    fn prompt(&self, out: &mut dyn Write, text: &str) -> Result<()> {
        if !self.quiet {
            write!(out, "{}", text)?;
            out.flush()?;
        }
        Ok(())
    }

    fn handle<R: BufRead>(
        &mut self,
        line: &str,
        lines: &mut Lines<R>,
        out: &mut dyn Write,
    ) -> Result<Flow> {
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(cmd, rest)| (cmd, rest.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "list" | "ls" => self.list(out)?,
            "show" => {
                let item = self.session.item(rest)?;
                write_item_human(out, item, self.session.score(rest))?;
            }
            "set" => self.set(rest, out)?,
            "group" => {
                if rest.is_empty() {
                    writeln!(out, "Group: {}", self.session.group_name())?;
                } else {
                    self.session.set_group_name(rest);
                }
            }
            "summary" => write_summary_human(out, &*self.session)?,
            "reset" => self.reset(lines, out)?,
            "export" => self.export(rest, out)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => writeln!(out, "unknown command '{}' (type `help`)", other)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&self, out: &mut dyn Write) -> Result<()> {
        for category in self.session.categories() {
            writeln!(out, "{}", category_label(category))?;
            for item in self.session.items().iter().filter(|i| i.category == category) {
                write_item_human(out, item, self.session.score(&item.id))?;
            }
        }
        Ok(())
    }

    fn set(&mut self, rest: &str, out: &mut dyn Write) -> Result<()> {
        let mut parts = rest.split_whitespace();
        let (Some(id), Some(raw), None) = (parts.next(), parts.next(), parts.next()) else {
            bail_usage!("usage: set <id> <score>");
        };
        let Ok(value) = raw.parse::<i64>() else {
            bail_invalid!("score", raw);
        };

        let stored = self.session.set_score(id, value)?;
        let item = self.session.item(id)?;
        write_item_human(out, item, stored)?;
        if i64::from(stored) != value {
            writeln!(out, "           (clamped to {})", stored)?;
        }
        Ok(())
    }

    fn reset<R: BufRead>(&mut self, lines: &mut Lines<R>, out: &mut dyn Write) -> Result<()> {
        write!(out, "Reset all scores and the group name? [y/N] ")?;
        out.flush()?;

        let answer = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        if matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes" | "o" | "oui"
        ) {
            self.session.reset();
            writeln!(out, "Grid reset.")?;
        } else {
            writeln!(out, "Reset cancelled.")?;
        }
        Ok(())
    }

    fn export(&self, rest: &str, out: &mut dyn Write) -> Result<()> {
        let output = (!rest.is_empty()).then(|| resolve_against(&self.root, Path::new(rest)));
        let path = resolve_output_path(
            output.as_deref(),
            &self.export_dir,
            self.session.group_name(),
            Local::now().date_naive(),
        );
        let rows = write_export(&*self.session, &path)?;
        writeln!(out, "Exported {} criteria to {}", rows, path.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const RUBRIC: &str = "h\n\"1. Oral (50%)\",Clarte,d,Confus,Correct,Limpide,10\n\"2. Code (50%)\",Tests,d,Aucun,Quelques,Complets,5";

    fn run_script(session: &mut Session, dir: &Path, script: &str) -> String {
        let mut out = Vec::new();
        let mut evaluation =
            Evaluation::new(session, dir.to_path_buf(), dir.to_path_buf(), true);
        evaluation.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_set_shows_level_text() {
        let dir = tempdir().unwrap();
        let mut session = Session::from_rubric_text(RUBRIC);

        let out = run_script(&mut session, dir.path(), "set crit_1 7\nset crit_2 9\n");

        assert_eq!(session.score("crit_1"), 7);
        assert_eq!(session.score("crit_2"), 5);
        assert!(out.contains("Niveau Excellent: Limpide"));
        assert!(out.contains("(clamped to 5)"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let dir = tempdir().unwrap();
        let mut session = Session::from_rubric_text(RUBRIC);

        let out = run_script(
            &mut session,
            dir.path(),
            "set ghost 3\nset crit_1 lots\nset crit_1\nfrobnicate\nset crit_1 2\n",
        );

        assert!(out.contains("error: criterion not found: ghost"));
        assert!(out.contains("error: invalid score: lots"));
        assert!(out.contains("error: usage: set <id> <score>"));
        assert!(out.contains("unknown command 'frobnicate'"));
        assert_eq!(session.score("crit_1"), 2);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let dir = tempdir().unwrap();
        let mut session = Session::from_rubric_text(RUBRIC);

        let out = run_script(
            &mut session,
            dir.path(),
            "group Team 1\nset crit_1 6\nreset\nn\n",
        );
        assert!(out.contains("Reset cancelled."));
        assert_eq!(session.score("crit_1"), 6);
        assert_eq!(session.group_name(), "Team 1");

        let out = run_script(&mut session, dir.path(), "reset\noui\n");
        assert!(out.contains("Grid reset."));
        assert_eq!(session.score("crit_1"), 0);
        assert_eq!(session.group_name(), "");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let mut session = Session::from_rubric_text(RUBRIC);

        let out = run_script(
            &mut session,
            dir.path(),
            "export\ngroup Team Blue\nset crit_2 3\nexport result.csv\nquit\nset crit_1 9\n",
        );

        assert!(out.contains("error: group name is required before exporting"));
        assert!(out.contains("Exported 2 criteria"));
        let csv = fs::read_to_string(dir.path().join("result.csv")).unwrap();
        assert!(csv.contains("\"Team Blue\",\"2. Code (50%)\",\"Tests\",3,5,Moyen"));
        // commands after quit are not read
        assert_eq!(session.score("crit_1"), 0);
    }

    #[test]
    fn test_summary_and_list() {
        let dir = tempdir().unwrap();
        let mut session = Session::from_rubric_text(RUBRIC);

        let out = run_script(&mut session, dir.path(), "set crit_1 5\nsummary\nlist\n");

        assert!(out.contains("Total: 5/15 (33%)"));
        assert!(out.contains("Oral\n  crit_1"));
        assert!(out.contains("Niveau Moyen: Correct"));
    }
}
