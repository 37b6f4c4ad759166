//! Aggregate views derived from a rubric and its scores
//!
//! Everything here is a pure function of `(items, scores)`. Nothing is
//! cached; callers recompute after each change.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::rubric::{categories, RubricItem};
use crate::session::Scores;

/// Numbering prefix such as `"2. "`
static LEADING_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();

/// Weight suffix such as `" (35%)"`
static TRAILING_WEIGHT: OnceLock<Option<Regex>> = OnceLock::new();

fn strip_pattern<'a>(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &str,
    text: &'a str,
) -> Cow<'a, str> {
    match cell.get_or_init(|| Regex::new(pattern).ok()) {
        Some(re) => re.replace(text, ""),
        None => Cow::Borrowed(text),
    }
}

/// Score of one item, 0 when the mapping has no entry for it
pub fn item_score(item: &RubricItem, scores: &Scores) -> u32 {
    scores.get(&item.id).copied().unwrap_or(0)
}

/// Sum of the scores of all items
pub fn total_score(items: &[RubricItem], scores: &Scores) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item_score(item, scores)))
        .sum()
}

/// Sum of the max points of all items
pub fn total_max(items: &[RubricItem]) -> u64 {
    items.iter().map(|item| u64::from(item.max_points)).sum()
}

/// `score / max * 100`, or 0 when `max` is 0
pub fn percentage(score: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        score as f64 * 100.0 / max as f64
    }
}

/// Short display label for a category: `"2. Technique (35%)"` becomes `"Technique"`
pub fn category_label(category: &str) -> String {
    let label = strip_pattern(&LEADING_NUMBER, r"^\d+\.\s*", category);
    strip_pattern(&TRAILING_WEIGHT, r"\s*\(\d+%\)$", &label).into_owned()
}

/// Sub-totals for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub label: String,
    pub score: u64,
    pub max: u64,
    pub percentage: f64,
}

impl CategoryScore {
    fn new(category: &str, score: u64, max: u64) -> Self {
        Self {
            category: category.to_string(),
            label: category_label(category),
            score,
            max,
            percentage: percentage(score, max),
        }
    }
}

/// Per-category sub-totals, in first-seen category order
pub fn category_breakdown(items: &[RubricItem], scores: &Scores) -> Vec<CategoryScore> {
    categories(items)
        .into_iter()
        .map(|category| {
            let (score, max) = items
                .iter()
                .filter(|item| item.category == category)
                .fold((0u64, 0u64), |(score, max), item| {
                    (
                        score + u64::from(item_score(item, scores)),
                        max + u64::from(item.max_points),
                    )
                });
            CategoryScore::new(category, score, max)
        })
        .collect()
}

/// Totals and category breakdown for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_score: u64,
    pub total_max: u64,
    pub percentage: f64,
    pub categories: Vec<CategoryScore>,
}

impl Summary {
    pub fn compute(items: &[RubricItem], scores: &Scores) -> Self {
        let total_score = total_score(items, scores);
        let total_max = total_max(items);
        Self {
            total_score,
            total_max,
            percentage: percentage(total_score, total_max),
            categories: category_breakdown(items, scores),
        }
    }
}
