use chrono::{DateTime, Utc};

use super::types::{Deal, DealDraft, DealPatch, DealStage, ProbabilityBand};
use crate::models::constants::{
    DEFAULT_PROBABILITY, PROBABILITY_HIGH_THRESHOLD, PROBABILITY_MEDIUM_THRESHOLD,
};

impl Deal {
    /// Build a stored deal from validated form data.
    ///
    /// Only stores call this: the id and timestamps are theirs to assign.
    pub fn from_draft(id: u64, draft: DealDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            value: draft.value,
            stage: draft.stage,
            probability: draft.probability,
            contact_id: draft.contact_id,
            close_date: draft.close_date,
            notes: draft.notes,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Merge a partial update into this record and bump `updated_at`.
    pub fn apply_patch(&mut self, patch: &DealPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(probability) = patch.probability {
            self.probability = probability;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = Some(contact_id);
        }
        if let Some(close_date) = patch.close_date {
            self.close_date = Some(close_date);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        self.updated_at = Some(now);
    }

    pub fn probability_band(&self) -> ProbabilityBand {
        ProbabilityBand::of(self.probability)
    }
}

impl DealPatch {
    /// A patch touching only the stage field, as issued by a board drop.
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Default::default()
        }
    }
}

impl DealDraft {
    pub fn new(title: impl Into<String>, value: f64) -> Self {
        Self {
            title: title.into(),
            value,
            stage: DealStage::default(),
            probability: DEFAULT_PROBABILITY,
            contact_id: None,
            close_date: None,
            notes: None,
        }
    }

    /// Pre-fill the edit form from an existing deal.
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            title: deal.title.clone(),
            value: deal.value,
            stage: deal.stage,
            probability: deal.probability,
            contact_id: deal.contact_id,
            close_date: deal.close_date,
            notes: deal.notes.clone(),
        }
    }

    /// Full-record patch: a form edit replaces every editable field.
    pub fn into_patch(self) -> DealPatch {
        DealPatch {
            title: Some(self.title.trim().to_string()),
            value: Some(self.value),
            stage: Some(self.stage),
            probability: Some(self.probability),
            contact_id: self.contact_id,
            close_date: self.close_date,
            notes: self.notes,
        }
    }
}

impl ProbabilityBand {
    pub fn of(probability: u8) -> Self {
        if probability >= PROBABILITY_HIGH_THRESHOLD {
            ProbabilityBand::High
        } else if probability >= PROBABILITY_MEDIUM_THRESHOLD {
            ProbabilityBand::Medium
        } else {
            ProbabilityBand::Low
        }
    }
}
