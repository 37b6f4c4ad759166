//! Rubric shipped with the binary, used when no rubric file is configured

use super::{parse_rubric_csv_with_report, RubricParse};

/// Name reported for the embedded rubric in logs and errors
pub const BUILTIN_RUBRIC_NAME: &str = "<builtin>";

/// Raw CSV text of the embedded rubric
pub const BUILTIN_RUBRIC_CSV: &str = include_str!("default_rubric.csv");

/// Parse the embedded rubric
pub fn builtin_rubric() -> RubricParse {
    parse_rubric_csv_with_report(BUILTIN_RUBRIC_CSV)
}
