//! Input validation for deal forms and command-line arguments.
//!
//! Form validation collects every field error at once so the caller can show
//! them together, mirroring an edit form that highlights each bad field.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::constants::MAX_PROBABILITY;
use crate::models::deal::{DealDraft, DealStage};
use crate::models::filter::{StageFilter, ValueRange};

/// Maximum allowed length for a deal title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for deal notes.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found in one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Error message for a field, if that field was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Validate deal form data before it is sent to the store.
///
/// Checks: title present, value greater than zero, contact selected, close
/// date set, probability within 0..=100, and length limits on free text.
pub fn validate_deal_draft(draft: &DealDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("title", "Title is required");
    } else {
        let length = title.chars().count();
        if length > MAX_TITLE_LENGTH {
            errors.push(
                "title",
                format!("Title too long: {length} characters (max {MAX_TITLE_LENGTH})"),
            );
        }
    }

    if !draft.value.is_finite() || draft.value <= 0.0 {
        errors.push("value", "Value must be greater than 0");
    }

    if draft.contact_id.is_none() {
        errors.push("contactId", "Contact is required");
    }

    if draft.close_date.is_none() {
        errors.push("closeDate", "Close date is required");
    }

    if draft.probability > MAX_PROBABILITY {
        errors.push(
            "probability",
            format!("Probability must be between 0 and {MAX_PROBABILITY}"),
        );
    }

    if let Some(notes) = &draft.notes {
        let length = notes.chars().count();
        if length > MAX_NOTES_LENGTH {
            errors.push(
                "notes",
                format!("Notes too long: {length} characters (max {MAX_NOTES_LENGTH})"),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a close date given either as `YYYY-MM-DD` or as RFC 3339.
pub fn parse_close_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("Invalid close date: {s}"));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("Invalid close date: {s}. Use YYYY-MM-DD"))
}

/// Clap value parser for stage arguments.
pub fn clap_stage_parser(s: &str) -> Result<DealStage, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Clap value parser for `--stage` filter arguments (accepts `all`).
pub fn clap_stage_filter_parser(s: &str) -> Result<StageFilter, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Clap value parser for `--value` filter arguments.
pub fn clap_value_range_parser(s: &str) -> Result<ValueRange, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Clap value parser for close dates.
pub fn clap_close_date_parser(s: &str) -> Result<DateTime<Utc>, String> {
    parse_close_date(s)
}

/// Clap value parser for probabilities.
pub fn clap_probability_parser(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid probability: {s}"))?;
    if value > MAX_PROBABILITY {
        return Err(format!("Probability must be between 0 and {MAX_PROBABILITY}"));
    }
    Ok(value)
}
