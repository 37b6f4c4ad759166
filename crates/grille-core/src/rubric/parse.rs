//! Rubric CSV parsing
//!
//! The expected layout is one header line followed by one line per
//! criterion: `category,criteria,description,low,mid,high,max_points`.
//! Fields may be wrapped in double quotes, in which case they can contain
//! commas and doubled quotes (`""`). Malformed rows are dropped rather than
//! failing the whole parse.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use super::{RubricItem, DEFAULT_MAX_POINTS, MAX_POINTS_LIMIT};
use crate::trace_time;

/// Number of fields a data line must resolve to
pub const FIELD_COUNT: usize = 7;

/// Something the parser repaired or dropped while reading a rubric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseDiagnostic {
    /// Line skipped because it resolved to fewer than seven fields
    TooFewFields { line: usize, fields: usize },
    /// Max points unreadable, not positive or above the limit; the default was used
    MaxPointsDefaulted { line: usize, raw: String },
}

impl ParseDiagnostic {
    /// Zero-based line index in the trimmed input
    pub fn line(&self) -> usize {
        match self {
            ParseDiagnostic::TooFewFields { line, .. }
            | ParseDiagnostic::MaxPointsDefaulted { line, .. } => *line,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParseDiagnostic::TooFewFields { fields, .. } => format!(
                "skipped: {} field(s), expected at least {}",
                fields, FIELD_COUNT
            ),
            ParseDiagnostic::MaxPointsDefaulted { raw, .. } => format!(
                "max points {:?} is not an integer in 1..={}, using {}",
                raw, MAX_POINTS_LIMIT, DEFAULT_MAX_POINTS
            ),
        }
    }
}

/// Parsed rubric plus the repairs made along the way
#[derive(Debug, Clone, Default)]
pub struct RubricParse {
    pub items: Vec<RubricItem>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parse a rubric, discarding diagnostics
pub fn parse_rubric_csv(text: &str) -> Vec<RubricItem> {
    parse_rubric_csv_with_report(text).items
}

/// Parse a rubric and report skipped lines and repaired values.
///
/// Item ids are `crit_<line>` where `line` is the zero-based index in the
/// trimmed input, so blank or skipped lines never shift later ids.
pub fn parse_rubric_csv_with_report(text: &str) -> RubricParse {
    let start = Instant::now();
    let mut parse = RubricParse::default();

    for (index, line) in text.trim().split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() < FIELD_COUNT {
            debug!(line = index, fields = fields.len(), "skip_short_row");
            parse.diagnostics.push(ParseDiagnostic::TooFewFields {
                line: index,
                fields: fields.len(),
            });
            continue;
        }

        let max_points = match parse_max_points(&fields[6]) {
            Some(points) => points,
            None => {
                warn!(
                    line = index,
                    raw = %fields[6],
                    default = DEFAULT_MAX_POINTS,
                    "max points defaulted"
                );
                parse.diagnostics.push(ParseDiagnostic::MaxPointsDefaulted {
                    line: index,
                    raw: fields[6].clone(),
                });
                DEFAULT_MAX_POINTS
            }
        };

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        parse.items.push(RubricItem {
            id: format!("crit_{}", index),
            category: next(),
            criteria: next(),
            description: next(),
            level_low: next(),
            level_mid: next(),
            level_high: next(),
            max_points,
        });
    }

    trace_time!(start, "parse_rubric", items = parse.items.len());
    parse
}

/// Split a line on commas that sit outside double quotes, then clean each field
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (pos, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(clean_field(&line[field_start..pos]));
                field_start = pos + 1;
            }
            _ => {}
        }
    }
    fields.push(clean_field(&line[field_start..]));

    fields
}

/// Trim, drop one surrounding quote on each side, and unescape `""`
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.replace("\"\"", "\"")
}

/// Read a leading integer (`"12 pts"` reads as 12); values outside `1..=MAX_POINTS_LIMIT` are rejected
fn parse_max_points(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: u64 = digits[..end].parse().ok()?;

    if negative {
        return None;
    }
    u32::try_from(value)
        .ok()
        .filter(|points| (1..=MAX_POINTS_LIMIT).contains(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Categorie,Critere,Description,Insuffisant,Moyen,Excellent,Points";

    #[test]
    fn test_parse_basic_rows() {
        let text = format!(
            "{}\nOral,Clarte,Expose clair,Confus,Correct,Limpide,10\nTechnique,Code,Qualite du code,Fragile,Propre,Exemplaire,5",
            HEADER
        );
        let items = parse_rubric_csv(&text);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "crit_1");
        assert_eq!(items[0].category, "Oral");
        assert_eq!(items[0].criteria, "Clarte");
        assert_eq!(items[0].description, "Expose clair");
        assert_eq!(items[0].level_low, "Confus");
        assert_eq!(items[0].level_mid, "Correct");
        assert_eq!(items[0].level_high, "Limpide");
        assert_eq!(items[0].max_points, 10);
        assert_eq!(items[1].id, "crit_2");
        assert_eq!(items[1].max_points, 5);
    }

    #[test]
    fn test_quoted_comma_stays_in_one_field() {
        assert_eq!(
            split_fields(r#"A,"Foo, bar",C"#),
            vec!["A".to_string(), "Foo, bar".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn test_doubled_quotes_are_unescaped() {
        assert_eq!(
            split_fields(r#""Say ""hi""",x"#),
            vec![r#"Say "hi""#.to_string(), "x".to_string()]
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let fields = split_fields(" A , \"B\" ,C\r");
        assert_eq!(fields, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_short_row_skipped_without_id_collision() {
        let text = format!(
            "{}\nA,c1,d,l,m,h,10\nA,B\nB,c3,d,l,m,h,10",
            HEADER
        );
        let parse = parse_rubric_csv_with_report(&text);

        let ids: Vec<&str> = parse.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["crit_1", "crit_3"]);
        assert_eq!(
            parse.diagnostics,
            vec![ParseDiagnostic::TooFewFields { line: 2, fields: 2 }]
        );
    }

    #[test]
    fn test_blank_lines_consume_their_index() {
        let text = format!("{}\nA,c1,d,l,m,h,10\n\nA,c2,d,l,m,h,10", HEADER);
        let items = parse_rubric_csv(&text);

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "crit_3");
    }

    #[test]
    fn test_max_points_fallback() {
        let text = format!(
            "{}\nA,c1,d,l,m,h,abc\nA,c2,d,l,m,h,0\nA,c3,d,l,m,h,-4\nA,c4,d,l,m,h,\nA,c5,d,l,m,h,15 pts",
            HEADER
        );
        let parse = parse_rubric_csv_with_report(&text);
        let points: Vec<u32> = parse.items.iter().map(|i| i.max_points).collect();

        assert_eq!(points, vec![10, 10, 10, 10, 15]);
        assert_eq!(parse.diagnostics.len(), 4);
        assert!(parse
            .diagnostics
            .iter()
            .all(|d| matches!(d, ParseDiagnostic::MaxPointsDefaulted { .. })));
        assert_eq!(parse.diagnostics[0].line(), 1);
    }

    #[test]
    fn test_oversized_max_points_fall_back() {
        let text = format!(
            "{}\nA,c1,d,l,m,h,4294967295\nA,c2,d,l,m,h,99999999999999999999\nA,c3,d,l,m,h,1000\nA,c4,d,l,m,h,1001",
            HEADER
        );
        let parse = parse_rubric_csv_with_report(&text);
        let points: Vec<u32> = parse.items.iter().map(|i| i.max_points).collect();

        assert_eq!(points, vec![10, 10, 1000, 10]);
        let lines: Vec<usize> = parse.diagnostics.iter().map(|d| d.line()).collect();
        assert_eq!(lines, vec![1, 2, 4]);
        assert_eq!(
            parse.diagnostics[0],
            ParseDiagnostic::MaxPointsDefaulted {
                line: 1,
                raw: "4294967295".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse_rubric_csv("").is_empty());
        assert!(parse_rubric_csv(HEADER).is_empty());
        assert!(parse_rubric_csv(&format!("{}\n\n", HEADER)).is_empty());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let text = format!("{}\nA,c1,d,l,m,h,8,extra,more", HEADER);
        let items = parse_rubric_csv(&text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].max_points, 8);
    }

    #[test]
    fn test_crlf_input() {
        let text = format!("{}\r\nA,c1,d,l,m,h,6\r\n", HEADER);
        let items = parse_rubric_csv(&text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].max_points, 6);
        assert_eq!(items[0].level_high, "h");
    }

    #[test]
    fn test_diagnostic_messages() {
        let short = ParseDiagnostic::TooFewFields { line: 3, fields: 2 };
        assert!(short.message().contains("expected at least 7"));
        let repaired = ParseDiagnostic::MaxPointsDefaulted {
            line: 4,
            raw: "n/a".to_string(),
        };
        assert!(repaired.message().contains("using 10"));
    }
}
