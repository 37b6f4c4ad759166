//! Where a rubric comes from: the embedded default or a CSV file

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::builtin::{builtin_rubric, BUILTIN_RUBRIC_NAME};
use super::{parse_rubric_csv_with_report, RubricParse};
use crate::error::{GradeError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RubricSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl RubricSource {
    /// Pick the first source given: command line, then configuration, then builtin
    pub fn resolve(cli: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        match cli.or(config) {
            Some(path) => RubricSource::File(path),
            None => RubricSource::Builtin,
        }
    }

    /// Read and parse the rubric.
    ///
    /// Malformed rows never fail the load, but a rubric with no usable
    /// criterion is rejected.
    pub fn load(&self) -> Result<RubricParse> {
        let parse = match self {
            RubricSource::Builtin => builtin_rubric(),
            RubricSource::File(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| GradeError::io_operation("read rubric", path.display(), e))?;
                parse_rubric_csv_with_report(&text)
            }
        };

        debug!(
            source = %self,
            items = parse.items.len(),
            diagnostics = parse.diagnostics.len(),
            "rubric loaded"
        );

        if parse.items.is_empty() {
            return Err(GradeError::EmptyRubric {
                source_name: self.to_string(),
            });
        }
        Ok(parse)
    }
}

impl fmt::Display for RubricSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricSource::Builtin => f.write_str(BUILTIN_RUBRIC_NAME),
            RubricSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
