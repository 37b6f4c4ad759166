//! Result CSV generation
//!
//! Produces the evaluation export: one header row and one row per
//! criterion with the assigned score, max points and band reached.
//! Text fields are always quoted; numbers and band labels never are.

use crate::error::{GradeError, Result};
use crate::rubric::RubricItem;
use crate::session::Scores;
use crate::summary::item_score;

/// Column names of the result CSV
pub const RESULT_HEADER: [&str; 6] = [
    "Group",
    "Category",
    "Criterion",
    "AssignedScore",
    "MaxPoints",
    "LevelReached",
];

/// Reject empty or whitespace-only group names
pub fn validate_group_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(GradeError::EmptyGroupName);
    }
    Ok(name)
}

/// Wrap a text field in double quotes, doubling any quote inside it
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Build the result CSV for a group. Missing scores are written as 0.
///
/// Rows are separated by `\n` with no trailing newline. The group name is
/// not validated here; see [`validate_group_name`].
pub fn generate_result_csv(group_name: &str, items: &[RubricItem], scores: &Scores) -> String {
    let group = quote_field(group_name);
    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(RESULT_HEADER.join(","));

    for item in items {
        let score = item_score(item, scores);
        rows.push(format!(
            "{},{},{},{},{},{}",
            group,
            quote_field(&item.category),
            quote_field(&item.criteria),
            score,
            item.max_points,
            item.band(score).label()
        ));
    }

    rows.join("\n")
}
