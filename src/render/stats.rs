//! Pipeline summary and contact listing

use colored::Colorize;
use std::io::Write;

use super::card::stage_badge;
use super::format::{format_currency, format_percent};
use crate::models::contact::Contact;
use crate::pipeline::PipelineStats;

pub fn render_stats<W: Write>(w: &mut W, stats: &PipelineStats) -> std::io::Result<()> {
    writeln!(w, "{}", "Pipeline summary".bold())?;
    writeln!(w, "  Total deals:        {}", stats.total_deals)?;
    writeln!(
        w,
        "  Pipeline value:     {}",
        format_currency(stats.total_value)
    )?;
    writeln!(
        w,
        "  Open value:         {}",
        format_currency(stats.open_value)
    )?;
    writeln!(
        w,
        "  Won deals value:    {}",
        format_currency(stats.won_value).green()
    )?;
    writeln!(
        w,
        "  Conversion rate:    {}",
        format_percent(stats.conversion_rate)
    )?;
    writeln!(
        w,
        "  Average deal size:  {}",
        format_currency(stats.average_deal_size)
    )?;
    writeln!(w)?;
    writeln!(w, "{}", "Deals by stage".bold())?;
    for (stage, count) in &stats.by_stage {
        writeln!(
            w,
            "  {:<13} {:>4}  {}",
            stage_badge(*stage),
            count,
            format_percent(stats.stage_share(*stage)).dimmed()
        )?;
    }
    Ok(())
}

pub fn render_contacts<W: Write>(w: &mut W, contacts: &[Contact]) -> std::io::Result<()> {
    if contacts.is_empty() {
        writeln!(w, "No contacts found")?;
        return Ok(());
    }
    for contact in contacts {
        writeln!(
            w,
            "{:>5}  {:<24}  {:<28}  {}",
            contact.id,
            contact.name.bold(),
            contact.email,
            contact.company.dimmed()
        )?;
    }
    Ok(())
}
