//! Board view: one lane per stage with count and total

use colored::Colorize;
use std::io::Write;

use super::card::{render_card, stage_badge};
use super::format::format_currency;
use crate::models::filter::FilterState;
use crate::pipeline::PipelineBoard;
use crate::store::{ContactStore, DealStore};

/// Render every stage lane for the board's current filters.
///
/// An empty pipeline gets a single hint instead of six empty lanes; an empty
/// lane in a non-empty pipeline shows a drop hint.
pub fn render_board<W: Write, D: DealStore, C: ContactStore>(
    w: &mut W,
    board: &PipelineBoard<D, C>,
) -> std::io::Result<()> {
    if board.deals().is_empty() {
        writeln!(w, "{}", "No deals in your pipeline".bold())?;
        writeln!(
            w,
            "Start by creating your first deal: dealboard deal create --title ..."
        )?;
        return Ok(());
    }

    render_filter_line(w, board.filters())?;

    for column in board.columns() {
        writeln!(w)?;
        writeln!(
            w,
            "{} {} {}",
            stage_badge(column.stage),
            format!("({})", column.count()).dimmed(),
            format_currency(column.total).bold()
        )?;

        if column.is_empty() {
            writeln!(w, "  {}", "Drop deals here".dimmed())?;
            continue;
        }
        for deal in &column.deals {
            render_card(w, deal, board.contact_name(deal), "  ")?;
        }
    }
    Ok(())
}

fn render_filter_line<W: Write>(w: &mut W, filters: &FilterState) -> std::io::Result<()> {
    if !filters.has_active_filters() {
        return Ok(());
    }
    writeln!(
        w,
        "{} stage={} value={}",
        "Filters:".bold(),
        filters.stage.to_string().cyan(),
        filters.value_range.to_string().cyan()
    )
}
