use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;

use super::common::open_board;
use crate::config::Config;
use crate::error::BoardError;
use crate::models::deal::{DealDraft, DealStage};
use crate::models::filter::{search_deals, StageFilter};
use crate::render::format::format_close_date;
use crate::render::{render_card, render_row};

/// Deal form fields supplied on the command line. `None` keeps the current
/// value when editing and falls back to the form default when creating.
#[derive(Debug, Clone, Default)]
pub struct DealFields {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub contact: Option<u64>,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl DealFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.value.is_none()
            && self.stage.is_none()
            && self.probability.is_none()
            && self.contact.is_none()
            && self.close_date.is_none()
            && self.notes.is_none()
    }

    /// Overwrite the draft with every field that was given.
    pub fn apply_to(self, draft: &mut DealDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(value) = self.value {
            draft.value = value;
        }
        if let Some(stage) = self.stage {
            draft.stage = stage;
        }
        if let Some(probability) = self.probability {
            draft.probability = probability;
        }
        if let Some(contact) = self.contact {
            draft.contact_id = Some(contact);
        }
        if let Some(close_date) = self.close_date {
            draft.close_date = Some(close_date);
        }
        if let Some(notes) = self.notes {
            draft.notes = Some(notes);
        }
    }

    /// Form contents for a new deal.
    pub fn into_new_draft(self) -> DealDraft {
        let mut draft = DealDraft::new(String::new(), 0.0);
        self.apply_to(&mut draft);
        draft
    }
}

/// List deals matching a title search and stage filter.
pub fn list(config: &Config, search: Option<&str>, stage: StageFilter) -> Result<()> {
    let board = open_board(config)?;
    let matches = search_deals(board.deals(), search.unwrap_or(""), stage);

    let mut out = std::io::stdout().lock();
    if matches.is_empty() {
        writeln!(out, "No deals found")?;
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        format!(
            "{:>5}  {:<32}  {:>12}  {:<13}  {:>5}  {}",
            "ID", "TITLE", "VALUE", "STAGE", "PROB", "CONTACT"
        )
        .bold()
    )?;
    for deal in matches {
        render_row(&mut out, deal, board.contact_name(deal))?;
    }
    Ok(())
}

pub fn show(config: &Config, id: u64) -> Result<()> {
    let mut board = open_board(config)?;
    board.refresh_deal(id)?;
    let Some(deal) = board.deal(id) else {
        bail!("Deal {id} not found");
    };

    let mut out = std::io::stdout().lock();
    render_card(&mut out, deal, board.contact_name(deal), "")?;
    writeln!(out, "  Stage: {}", deal.stage.label())?;
    if let Some(contact) = board.contact_for(deal) {
        writeln!(out, "  Email: {}", contact.email)?;
        if !contact.company.is_empty() {
            writeln!(out, "  Company: {}", contact.company)?;
        }
    }
    if let Some(created) = &deal.created_at {
        writeln!(out, "  Created: {}", format_close_date(created).dimmed())?;
    }
    if let Some(updated) = &deal.updated_at {
        writeln!(out, "  Updated: {}", format_close_date(updated).dimmed())?;
    }
    Ok(())
}

pub fn create(config: &Config, fields: DealFields) -> Result<()> {
    let mut board = open_board(config)?;
    let draft = fields.into_new_draft();

    let deal = board.save_deal(None, draft).map_err(explain)?;
    println!(
        "{} Deal created successfully {}",
        "✓".green().bold(),
        format!("(#{} in {})", deal.id, deal.stage.label()).dimmed()
    );
    Ok(())
}

pub fn edit(config: &Config, id: u64, fields: DealFields) -> Result<()> {
    if fields.is_empty() {
        bail!("Nothing to change. Pass at least one field flag such as --title or --value");
    }

    let mut board = open_board(config)?;
    let mut draft = DealDraft::from_deal(board.refresh_deal(id)?);
    fields.apply_to(&mut draft);

    let deal = board.save_deal(Some(id), draft).map_err(explain)?;
    println!(
        "{} Deal updated successfully {}",
        "✓".green().bold(),
        format!("(#{})", deal.id).dimmed()
    );
    Ok(())
}

pub fn delete(config: &Config, id: u64) -> Result<()> {
    let mut board = open_board(config)?;
    if board.deal(id).is_none() {
        bail!("Deal {id} not found");
    }

    board
        .delete_deal(id)
        .with_context(|| format!("Failed to delete deal {id}"))?;
    println!("{} Deal deleted successfully", "✓".green().bold());
    Ok(())
}

/// Turn form validation failures into one line per field.
fn explain(err: BoardError) -> anyhow::Error {
    match err {
        BoardError::Invalid(errors) => {
            let lines: Vec<String> = errors
                .errors()
                .iter()
                .map(|e| format!("  {}: {}", e.field, e.message))
                .collect();
            anyhow::anyhow!("Please fix the following:\n{}", lines.join("\n"))
        }
        other => other.into(),
    }
}
