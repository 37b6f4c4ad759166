//! Evaluation session: the one mutable piece of state
//!
//! A `Session` owns the rubric it was created from, the score of every
//! criterion and the group name. It is passed explicitly to whatever needs
//! it; mutation goes through `set_score`, `set_group_name` and `reset`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{GradeError, Result};
use crate::export::{generate_result_csv, validate_group_name};
use crate::rubric::{self, parse_rubric_csv, Band, RubricItem};
use crate::summary::{self, CategoryScore, Summary};

/// Score per criterion id
pub type Scores = BTreeMap<String, u32>;

#[derive(Debug, Clone)]
pub struct Session {
    items: Vec<RubricItem>,
    scores: Scores,
    group_name: String,
}

impl Session {
    /// Start a session with every criterion at 0 and no group name
    pub fn new(items: Vec<RubricItem>) -> Self {
        let scores = zeroed(&items);
        Self {
            items,
            scores,
            group_name: String::new(),
        }
    }

    /// Parse a rubric and start a session on it
    pub fn from_rubric_text(text: &str) -> Self {
        Self::new(parse_rubric_csv(text))
    }

    pub fn items(&self) -> &[RubricItem] {
        &self.items
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn set_group_name(&mut self, name: impl Into<String>) {
        self.group_name = name.into();
    }

    /// Look up a criterion by id
    pub fn item(&self, id: &str) -> Result<&RubricItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| GradeError::criterion_not_found(id))
    }

    /// Replace the score of a criterion, clamped to `[0, max_points]`.
    ///
    /// Returns the value actually stored.
    pub fn set_score(&mut self, id: &str, value: i64) -> Result<u32> {
        let max_points = self.item(id)?.max_points;
        let clamped = value.clamp(0, i64::from(max_points));
        if clamped != value {
            debug!(id, value, clamped, max_points, "score clamped");
        }
        // clamped lies in [0, max_points], which always fits in u32
        let stored = u32::try_from(clamped).unwrap_or(max_points);
        self.scores.insert(id.to_string(), stored);
        Ok(stored)
    }

    /// Current score of a criterion, 0 when unset or unknown
    pub fn score(&self, id: &str) -> u32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    /// Band currently reached on a criterion
    pub fn band(&self, id: &str) -> Result<Band> {
        let item = self.item(id)?;
        Ok(item.band(self.score(id)))
    }

    /// Descriptive text for the band currently reached on a criterion
    pub fn level_text(&self, id: &str) -> Result<&str> {
        let item = self.item(id)?;
        Ok(item.level_text(item.band(self.score(id))))
    }

    /// Zero every score and clear the group name
    pub fn reset(&mut self) {
        self.scores = zeroed(&self.items);
        self.group_name.clear();
        debug!(items = self.items.len(), "session reset");
    }

    pub fn total_score(&self) -> u64 {
        summary::total_score(&self.items, &self.scores)
    }

    pub fn total_max(&self) -> u64 {
        summary::total_max(&self.items)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryScore> {
        summary::category_breakdown(&self.items, &self.scores)
    }

    pub fn categories(&self) -> Vec<&str> {
        rubric::categories(&self.items)
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.items, &self.scores)
    }

    /// Validate the group name and build the result CSV
    pub fn export_csv(&self) -> Result<String> {
        let group = validate_group_name(&self.group_name)?;
        Ok(generate_result_csv(group, &self.items, &self.scores))
    }
}

fn zeroed(items: &[RubricItem]) -> Scores {
    items.iter().map(|item| (item.id.clone(), 0)).collect()
}
