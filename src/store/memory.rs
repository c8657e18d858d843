//! In-process stores.
//!
//! Each instance owns its own records.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::records;
use super::{ContactStore, DealStore};
use crate::error::StoreResult;
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch};

#[derive(Debug, Default)]
pub struct MemoryDealStore {
    deals: Mutex<Vec<Deal>>,
}

impl MemoryDealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        Self {
            deals: Mutex::new(deals),
        }
    }

    /// Copy of the stored records, in storage order.
    pub fn snapshot(&self) -> Vec<Deal> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Deal>> {
        self.deals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DealStore for MemoryDealStore {
    fn fetch_all(&self) -> StoreResult<Vec<Deal>> {
        Ok(self.snapshot())
    }

    fn get(&self, id: u64) -> StoreResult<Deal> {
        records::find(&self.lock(), id)
    }

    fn create(&self, draft: DealDraft) -> StoreResult<Deal> {
        let deal = records::create(&mut self.lock(), draft);
        debug!(id = deal.id, "created deal in memory store");
        Ok(deal)
    }

    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal> {
        records::update(&mut self.lock(), id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        records::delete(&mut self.lock(), id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: Vec<Contact>,
}

impl MemoryContactStore {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

impl ContactStore for MemoryContactStore {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.contacts.clone())
    }
}
