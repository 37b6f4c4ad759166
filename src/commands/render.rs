//! Shared renderers for rubric items and score summaries

use std::io::Write;

use serde_json::json;

use grille_core::error::Result;
use grille_core::format::escape_quotes;
use grille_core::rubric::RubricItem;
use grille_core::session::Session;
use grille_core::summary::Summary;

const BAR_WIDTH: usize = 20;

/// Text gauge for a percentage, e.g. `[#########...........]`
pub fn bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// One criterion with its current score, band and band description
pub fn write_item_human(out: &mut dyn Write, item: &RubricItem, score: u32) -> Result<()> {
    let band = item.band(score);
    writeln!(
        out,
        "  {:<8} {} ({}/{})",
        item.id, item.criteria, score, item.max_points
    )?;
    writeln!(out, "           Niveau {}: {}", band, item.level_text(band))?;
    Ok(())
}

pub fn write_summary_human(out: &mut dyn Write, session: &Session) -> Result<()> {
    let summary = session.summary();
    if !session.group_name().trim().is_empty() {
        writeln!(out, "Group: {}", session.group_name())?;
    }
    writeln!(
        out,
        "Total: {}/{} ({:.0}%)",
        summary.total_score, summary.total_max, summary.percentage
    )?;
    writeln!(out)?;

    let width = summary
        .categories
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    for category in &summary.categories {
        writeln!(
            out,
            "  {:<width$}  {} {:>3}/{:<3} {:>3.0}%",
            category.label,
            bar(category.percentage),
            category.score,
            category.max,
            category.percentage,
            width = width
        )?;
    }
    Ok(())
}

pub fn write_summary_records(out: &mut dyn Write, session: &Session) -> Result<()> {
    let summary = session.summary();
    writeln!(
        out,
        "H grille={} mode=summary group=\"{}\" total={} max={} percentage={:.1}",
        env!("CARGO_PKG_VERSION"),
        escape_quotes(session.group_name()),
        summary.total_score,
        summary.total_max,
        summary.percentage
    )?;
    for category in &summary.categories {
        writeln!(
            out,
            "C category=\"{}\" label=\"{}\" score={} max={} percentage={:.1}",
            escape_quotes(&category.category),
            escape_quotes(&category.label),
            category.score,
            category.max,
            category.percentage
        )?;
    }
    for item in session.items() {
        let score = session.score(&item.id);
        writeln!(
            out,
            "S {} score={} max={} band={}",
            item.id,
            score,
            item.max_points,
            item.band(score)
        )?;
    }
    Ok(())
}

pub fn summary_json(session: &Session) -> serde_json::Value {
    let Summary {
        total_score,
        total_max,
        percentage,
        categories,
    } = session.summary();

    let items: Vec<serde_json::Value> = session
        .items()
        .iter()
        .map(|item| {
            let score = session.score(&item.id);
            json!({
                "id": item.id,
                "category": item.category,
                "criteria": item.criteria,
                "score": score,
                "max_points": item.max_points,
                "band": item.band(score),
            })
        })
        .collect();

    json!({
        "group": session.group_name(),
        "total_score": total_score,
        "total_max": total_max,
        "percentage": percentage,
        "categories": categories,
        "items": items,
    })
}
