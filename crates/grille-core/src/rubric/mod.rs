//! Rubric model: criteria, scoring bands and category ordering

pub mod builtin;
pub mod parse;
pub mod source;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use parse::{parse_rubric_csv, parse_rubric_csv_with_report, ParseDiagnostic, RubricParse};
pub use source::RubricSource;

/// Max points substituted when a row's value is missing, unreadable or not positive
pub const DEFAULT_MAX_POINTS: u32 = 10;

/// Largest max points a rubric row may declare
pub const MAX_POINTS_LIMIT: u32 = 1000;

/// Ratio above which a score reaches the middle band
pub const MID_BAND_THRESHOLD: f64 = 0.33;

/// Ratio above which a score reaches the top band
pub const HIGH_BAND_THRESHOLD: f64 = 0.66;

/// One scoring criterion of a rubric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricItem {
    pub id: String,
    pub category: String,
    pub criteria: String,
    pub description: String,
    pub level_low: String,
    pub level_mid: String,
    pub level_high: String,
    pub max_points: u32,
}

impl RubricItem {
    /// Band reached by `score` on this criterion
    pub fn band(&self, score: u32) -> Band {
        Band::classify(score, self.max_points)
    }

    /// Descriptive text for a band
    pub fn level_text(&self, band: Band) -> &str {
        match band {
            Band::Insuffisant => &self.level_low,
            Band::Moyen => &self.level_mid,
            Band::Excellent => &self.level_high,
        }
    }
}

/// Qualitative tier a score falls into, based on its ratio to max points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Insuffisant,
    Moyen,
    Excellent,
}

impl Band {
    /// Classify a score against its maximum.
    ///
    /// Comparisons are strict: a ratio of exactly 0.33 stays `Insuffisant`
    /// and exactly 0.66 stays `Moyen`. A zero maximum reads as ratio 0.
    pub fn classify(score: u32, max_points: u32) -> Band {
        let ratio = score_ratio(score, max_points);
        if ratio > HIGH_BAND_THRESHOLD {
            Band::Excellent
        } else if ratio > MID_BAND_THRESHOLD {
            Band::Moyen
        } else {
            Band::Insuffisant
        }
    }

    /// Label written to exports and shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Band::Insuffisant => "Insuffisant",
            Band::Moyen => "Moyen",
            Band::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `score / max_points`, or 0.0 when `max_points` is 0
pub fn score_ratio(score: u32, max_points: u32) -> f64 {
    if max_points == 0 {
        0.0
    } else {
        f64::from(score) / f64::from(max_points)
    }
}

/// Distinct categories in first-seen order
pub fn categories(items: &[RubricItem]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !seen.contains(&item.category.as_str()) {
            seen.push(&item.category);
        }
    }
    seen
}

#[cfg(test)]
pub(crate) fn item(id: &str, category: &str, max_points: u32) -> RubricItem {
    RubricItem {
        id: id.to_string(),
        category: category.to_string(),
        criteria: format!("Criterion {}", id),
        description: String::new(),
        level_low: "low".to_string(),
        level_mid: "mid".to_string(),
        level_high: "high".to_string(),
        max_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_out_of_ten() {
        assert_eq!(Band::classify(3, 10), Band::Insuffisant);
        assert_eq!(Band::classify(4, 10), Band::Moyen);
        assert_eq!(Band::classify(6, 10), Band::Moyen);
        assert_eq!(Band::classify(7, 10), Band::Excellent);
        assert_eq!(Band::classify(10, 10), Band::Excellent);
    }

    #[test]
    fn test_band_exact_thresholds_fall_into_lower_band() {
        assert_eq!(Band::classify(33, 100), Band::Insuffisant);
        assert_eq!(Band::classify(34, 100), Band::Moyen);
        assert_eq!(Band::classify(66, 100), Band::Moyen);
        assert_eq!(Band::classify(67, 100), Band::Excellent);
    }

    #[test]
    fn test_band_zero_max_is_insuffisant() {
        assert_eq!(Band::classify(5, 0), Band::Insuffisant);
        assert_eq!(score_ratio(5, 0), 0.0);
    }

    #[test]
    fn test_level_text_follows_band() {
        let crit = item("crit_1", "A", 5);
        assert_eq!(crit.level_text(crit.band(0)), "low");
        assert_eq!(crit.level_text(crit.band(2)), "mid");
        assert_eq!(crit.level_text(crit.band(5)), "high");
    }

    #[test]
    fn test_categories_first_seen_order() {
        let items = vec![
            item("crit_1", "Oral", 10),
            item("crit_2", "Technique", 10),
            item("crit_3", "Oral", 5),
            item("crit_4", "Gestion", 5),
        ];
        assert_eq!(categories(&items), vec!["Oral", "Technique", "Gestion"]);
    }

    #[test]
    fn test_band_display() {
        assert_eq!(Band::Moyen.to_string(), "Moyen");
    }
}
