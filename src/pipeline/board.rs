use tracing::{debug, info, warn};

use super::stats::PipelineStats;
use super::view::{self, StageColumn};
use crate::error::{BoardError, BoardResult};
use crate::models::constants::NO_CONTACT_LABEL;
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch, DealStage};
use crate::models::filter::{apply_filters, FilterState};
use crate::store::{ContactStore, DealStore};
use crate::validation::validate_deal_draft;

/// Result of dropping a card on a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Nothing was being dragged.
    NoDrag,
    /// The deal already sits in the target stage; the store was not called.
    Unchanged,
    /// The store confirmed the move; `deal` is the stored representation.
    Moved { deal: Deal, from: DealStage },
}

/// Local state of the pipeline board.
///
/// Holds the cached deals and contacts, the filter-bar selection and the
/// card being dragged. The cache changes only after the store confirms a
/// write, so a failed call leaves it exactly as it was.
pub struct PipelineBoard<D, C> {
    deal_store: D,
    contact_store: C,
    deals: Vec<Deal>,
    contacts: Vec<Contact>,
    filters: FilterState,
    dragging: Option<u64>,
}

impl<D: DealStore, C: ContactStore> PipelineBoard<D, C> {
    pub fn new(deal_store: D, contact_store: C) -> Self {
        Self {
            deal_store,
            contact_store,
            deals: Vec::new(),
            contacts: Vec::new(),
            filters: FilterState::default(),
            dragging: None,
        }
    }

    /// Replace the cached deals and contacts with the stores' contents.
    ///
    /// Both fetches must succeed; otherwise nothing is replaced and the
    /// caller may simply call `load` again.
    pub fn load(&mut self) -> BoardResult<()> {
        let deals = self.deal_store.fetch_all().map_err(BoardError::Load)?;
        let contacts = self.contact_store.fetch_all().map_err(BoardError::Load)?;

        debug!(
            deals = deals.len(),
            contacts = contacts.len(),
            "loaded pipeline data"
        );
        self.deals = deals;
        self.contacts = contacts;

        if let Some(id) = self.dragging {
            if !self.deals.iter().any(|d| d.id == id) {
                self.dragging = None;
            }
        }
        Ok(())
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn deal(&self, id: u64) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    /// Re-read one deal from the store and replace its cached copy.
    pub fn refresh_deal(&mut self, id: u64) -> BoardResult<&Deal> {
        let fresh = self.deal_store.get(id)?;
        debug!(id, "refreshed deal");
        self.replace_cached(fresh);
        self.deal(id).ok_or(BoardError::UnknownDeal(id))
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Cached deals passing the current filters, in cache order.
    pub fn filtered(&self) -> Vec<&Deal> {
        apply_filters(&self.deals, &self.filters)
    }

    /// One column per stage for the current filters.
    pub fn columns(&self) -> Vec<StageColumn<'_>> {
        view::columns(&self.filtered())
    }

    pub fn stage_total(&self, stage: DealStage) -> f64 {
        view::stage_total(&self.filtered(), stage)
    }

    /// Figures over every cached deal, ignoring filters.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats::compute(&self.deals)
    }

    /// Mark a cached deal as the one being dragged, replacing any previous one.
    pub fn begin_drag(&mut self, id: u64) -> BoardResult<()> {
        if self.deal(id).is_none() {
            return Err(BoardError::UnknownDeal(id));
        }
        self.dragging = Some(id);
        Ok(())
    }

    /// Clear the drag state, whether or not a drop happened.
    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<&Deal> {
        self.dragging.and_then(|id| self.deal(id))
    }

    /// Drop the dragged deal on `target`.
    ///
    /// Issues exactly one stage-only update when the stage changes, and
    /// swaps the cached record for the store's copy once it succeeds.
    pub fn drop_on(&mut self, target: DealStage) -> BoardResult<DropOutcome> {
        let Some(dragged) = self.dragging() else {
            return Ok(DropOutcome::NoDrag);
        };
        let id = dragged.id;
        let from = dragged.stage;

        if from == target || !from.can_transition_to(&target) {
            return Ok(DropOutcome::Unchanged);
        }

        match self.deal_store.update(id, &DealPatch::stage(target)) {
            Ok(updated) => {
                self.replace_cached(updated.clone());
                info!(id, %from, to = %target, "moved deal");
                Ok(DropOutcome::Moved {
                    deal: updated,
                    from,
                })
            }
            Err(source) => {
                warn!(id, %from, to = %target, error = %source, "stage update failed");
                Err(BoardError::StageUpdate {
                    id,
                    stage: target,
                    source,
                })
            }
        }
    }

    /// Drag `id` onto `target` and release it: begin, drop, end.
    pub fn move_deal(&mut self, id: u64, target: DealStage) -> BoardResult<DropOutcome> {
        self.begin_drag(id)?;
        let outcome = self.drop_on(target);
        self.end_drag();
        outcome
    }

    /// Create a deal (`existing` is `None`) or replace an existing deal's
    /// editable fields with the form contents.
    pub fn save_deal(&mut self, existing: Option<u64>, draft: DealDraft) -> BoardResult<Deal> {
        validate_deal_draft(&draft).map_err(BoardError::Invalid)?;

        match existing {
            Some(id) => {
                let updated = self.deal_store.update(id, &draft.into_patch())?;
                self.replace_cached(updated.clone());
                info!(id, "updated deal");
                Ok(updated)
            }
            None => {
                let created = self.deal_store.create(draft)?;
                self.deals.push(created.clone());
                info!(id = created.id, "created deal");
                Ok(created)
            }
        }
    }

    /// Hard-delete a deal from the store and the cache.
    pub fn delete_deal(&mut self, id: u64) -> BoardResult<()> {
        self.deal_store.delete(id)?;
        self.deals.retain(|d| d.id != id);
        if self.dragging == Some(id) {
            self.dragging = None;
        }
        info!(id, "deleted deal");
        Ok(())
    }

    pub fn contact_for(&self, deal: &Deal) -> Option<&Contact> {
        let id = deal.contact_id?;
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Contact name shown on a card.
    pub fn contact_name(&self, deal: &Deal) -> &str {
        self.contact_for(deal)
            .map_or(NO_CONTACT_LABEL, |c| c.name.as_str())
    }

    fn replace_cached(&mut self, deal: Deal) {
        match self.deals.iter_mut().find(|d| d.id == deal.id) {
            Some(slot) => *slot = deal,
            None => self.deals.push(deal),
        }
    }
}
