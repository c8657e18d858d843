//! Single deal card and deal-list rows

use colored::{ColoredString, Colorize};
use std::io::Write;

use super::format::{format_close_date, format_currency};
use crate::models::deal::{Deal, DealStage, ProbabilityBand};

/// Stage name coloured the way its column header is.
pub fn stage_badge(stage: DealStage) -> ColoredString {
    let label = stage.label().to_uppercase();
    match stage {
        DealStage::New => label.blue(),
        DealStage::Qualified => label.purple(),
        DealStage::Proposal => label.yellow(),
        DealStage::Negotiation => label.bright_yellow(),
        DealStage::ClosedWon => label.green(),
        DealStage::ClosedLost => label.red(),
    }
}

pub fn probability_badge(deal: &Deal) -> ColoredString {
    let text = format!("● {}%", deal.probability);
    match deal.probability_band() {
        ProbabilityBand::High => text.green(),
        ProbabilityBand::Medium => text.yellow(),
        ProbabilityBand::Low => text.red(),
    }
}

/// Multi-line card: title, value and probability, close date, notes, contact.
pub fn render_card<W: Write>(
    w: &mut W,
    deal: &Deal,
    contact_name: &str,
    indent: &str,
) -> std::io::Result<()> {
    writeln!(
        w,
        "{indent}{} {}",
        format!("#{}", deal.id).dimmed(),
        deal.title.bold()
    )?;
    writeln!(
        w,
        "{indent}  {}  {}",
        format_currency(deal.value),
        probability_badge(deal)
    )?;
    if let Some(close_date) = &deal.close_date {
        writeln!(w, "{indent}  Close: {}", format_close_date(close_date))?;
    }
    if let Some(notes) = deal.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        writeln!(w, "{indent}  {}", truncate(notes, 60).dimmed())?;
    }
    writeln!(w, "{indent}  Contact: {contact_name}")?;
    Ok(())
}

/// One row of the deal list.
pub fn render_row<W: Write>(w: &mut W, deal: &Deal, contact_name: &str) -> std::io::Result<()> {
    writeln!(
        w,
        "{:>5}  {:<32}  {:>12}  {:<13}  {:>4}%  {}",
        deal.id,
        truncate(&deal.title, 32),
        format_currency(deal.value),
        stage_badge(deal.stage),
        deal.probability,
        contact_name
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
