//! Record-list operations shared by the memory and file adapters.
//!
//! Ids are `max(id) + 1`, so an id freed by a delete of the highest record
//! can be handed out again.

use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::models::deal::{Deal, DealDraft, DealPatch};

pub(crate) const DEAL_ENTITY: &str = "Deal";

pub(crate) fn next_id(deals: &[Deal]) -> u64 {
    deals.iter().map(|d| d.id).max().unwrap_or(0) + 1
}

pub(crate) fn find(deals: &[Deal], id: u64) -> StoreResult<Deal> {
    deals
        .iter()
        .find(|d| d.id == id)
        .cloned()
        .ok_or(StoreError::NotFound {
            entity: DEAL_ENTITY,
            id,
        })
}

pub(crate) fn create(deals: &mut Vec<Deal>, draft: DealDraft) -> Deal {
    let deal = Deal::from_draft(next_id(deals), draft, Utc::now());
    deals.push(deal.clone());
    deal
}

pub(crate) fn update(deals: &mut [Deal], id: u64, patch: &DealPatch) -> StoreResult<Deal> {
    let deal = deals
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(StoreError::NotFound {
            entity: DEAL_ENTITY,
            id,
        })?;
    deal.apply_patch(patch, Utc::now());
    Ok(deal.clone())
}

pub(crate) fn delete(deals: &mut Vec<Deal>, id: u64) -> StoreResult<bool> {
    let index = deals
        .iter()
        .position(|d| d.id == id)
        .ok_or(StoreError::NotFound {
            entity: DEAL_ENTITY,
            id,
        })?;
    deals.remove(index);
    Ok(true)
}
