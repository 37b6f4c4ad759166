//! `grille rubric` - show the loaded rubric
//!
//! Criteria are grouped by category in first-seen order. `--check` adds the
//! rows the parser skipped or repaired.

use std::io::{self, Write};

use serde_json::json;

use super::dispatch::CommandContext;
use crate::cli::format::output_by_format;
use crate::cli::RubricArgs;
use grille_core::error::Result;
use grille_core::format::escape_quotes;
use grille_core::rubric::{categories, RubricParse, RubricSource};
use grille_core::summary::{category_label, total_max};

pub fn execute(ctx: &CommandContext, args: &RubricArgs) -> Result<()> {
    let source = ctx.rubric_source();
    let parse = ctx.load_rubric()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    output_by_format!(ctx.format(),
        json => {
            let value = rubric_json(&source, &parse, args.check);
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
        human => {
            write_human(&mut out, &parse, args.check, ctx.cli.quiet)?;
        },
        records => {
            write_records(&mut out, &source, &parse, args.check)?;
        }
    );
    Ok(())
}

fn rubric_json(source: &RubricSource, parse: &RubricParse, check: bool) -> serde_json::Value {
    let mut value = json!({
        "source": source.to_string(),
        "total_max": total_max(&parse.items),
        "categories": categories(&parse.items),
        "items": parse.items,
    });
    if check {
        value["diagnostics"] = json!(parse
            .diagnostics
            .iter()
            .map(|d| json!({ "line": d.line(), "message": d.message(), "detail": d }))
            .collect::<Vec<_>>());
    }
    value
}

fn write_human(out: &mut dyn Write, parse: &RubricParse, check: bool, quiet: bool) -> Result<()> {
    for category in categories(&parse.items) {
        let items: Vec<_> = parse
            .items
            .iter()
            .filter(|item| item.category == category)
            .collect();
        let max: u64 = items.iter().map(|item| u64::from(item.max_points)).sum();
        writeln!(out, "{} ({} pts)", category_label(category), max)?;

        for item in items {
            writeln!(out, "  {:<8} {} /{}", item.id, item.criteria, item.max_points)?;
            if !quiet {
                if !item.description.is_empty() {
                    writeln!(out, "           {}", item.description)?;
                }
                writeln!(out, "           - Insuffisant: {}", item.level_low)?;
                writeln!(out, "           - Moyen: {}", item.level_mid)?;
                writeln!(out, "           - Excellent: {}", item.level_high)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{} criteria, {} points",
        parse.items.len(),
        total_max(&parse.items)
    )?;

    if check {
        if parse.diagnostics.is_empty() {
            writeln!(out, "No parse issues.")?;
        }
        for diagnostic in &parse.diagnostics {
            writeln!(out, "line {}: {}", diagnostic.line() + 1, diagnostic.message())?;
        }
    }
    Ok(())
}

fn write_records(
    out: &mut dyn Write,
    source: &RubricSource,
    parse: &RubricParse,
    check: bool,
) -> Result<()> {
    writeln!(
        out,
        "H grille={} mode=rubric source=\"{}\" items={} max={}",
        env!("CARGO_PKG_VERSION"),
        escape_quotes(&source.to_string()),
        parse.items.len(),
        total_max(&parse.items)
    )?;
    for item in &parse.items {
        writeln!(
            out,
            "I {} category=\"{}\" criteria=\"{}\" max={}",
            item.id,
            escape_quotes(&item.category),
            escape_quotes(&item.criteria),
            item.max_points
        )?;
    }
    if check {
        for diagnostic in &parse.diagnostics {
            writeln!(
                out,
                "W line={} \"{}\"",
                diagnostic.line() + 1,
                escape_quotes(&diagnostic.message())
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grille_core::rubric::parse_rubric_csv_with_report;

    const RUBRIC: &str = "h\n\"1. Oral (50%)\",Clarte,Expose,Confus,Correct,Limpide,10\nbad,row\nCode,Tests,d,l,m,h,zero";

    #[test]
    fn test_human_groups_by_category() {
        let parse = parse_rubric_csv_with_report(RUBRIC);
        let mut buf = Vec::new();
        write_human(&mut buf, &parse, true, false).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Oral (10 pts)\n  crit_1   Clarte /10"));
        assert!(text.contains("- Excellent: Limpide"));
        assert!(text.contains("2 criteria, 20 points"));
        assert!(text.contains("line 3: skipped"));
        assert!(text.contains("line 4: max points \"zero\""));
    }

    #[test]
    fn test_records_lines() {
        let parse = parse_rubric_csv_with_report(RUBRIC);
        let mut buf = Vec::new();
        write_records(&mut buf, &RubricSource::Builtin, &parse, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("source=\"<builtin>\" items=2 max=20"));
        assert_eq!(
            lines[1],
            "I crit_1 category=\"1. Oral (50%)\" criteria=\"Clarte\" max=10"
        );
    }

    #[test]
    fn test_json_includes_diagnostics_on_check() {
        let parse = parse_rubric_csv_with_report(RUBRIC);
        let value = rubric_json(&RubricSource::Builtin, &parse, true);
        assert_eq!(value["items"][0]["id"], "crit_1");
        assert_eq!(value["diagnostics"][0]["detail"]["kind"], "too_few_fields");
        assert_eq!(value["categories"][1], "Code");

        let plain = rubric_json(&RubricSource::Builtin, &parse, false);
        assert!(plain.get("diagnostics").is_none());
    }
}
