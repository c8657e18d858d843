//! Record store contracts and their adapters.
//!
//! The board never persists anything itself: every mutation goes through a
//! [`DealStore`], and contacts are read through a [`ContactStore`] for display.
//! Adapters:
//! - [`memory`] - in-process records, used by tests and embedding callers
//! - [`file`] - JSON files in a data directory, guarded by advisory locks
//! - [`remote`] - a hosted record-query service over HTTP

pub mod file;
pub mod memory;
mod records;
pub mod remote;

use crate::error::StoreResult;
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch};

pub use file::{FileContactStore, FileDealStore};
pub use memory::{MemoryContactStore, MemoryDealStore};
pub use remote::{RemoteContactStore, RemoteDealStore};

/// Persistent store owning the canonical copy of every deal.
pub trait DealStore {
    /// Every deal record.
    fn fetch_all(&self) -> StoreResult<Vec<Deal>>;

    /// A single deal; `NotFound` if the id is unknown.
    fn get(&self, id: u64) -> StoreResult<Deal>;

    /// Create a deal. The store assigns the id and timestamps.
    fn create(&self, draft: DealDraft) -> StoreResult<Deal>;

    /// Apply a partial update and return the full stored record.
    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal>;

    /// Hard-delete a deal.
    fn delete(&self, id: u64) -> StoreResult<bool>;
}

/// Read-only contact lookup used to label deal cards.
pub trait ContactStore {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>>;
}

impl<T: DealStore + ?Sized> DealStore for &T {
    fn fetch_all(&self) -> StoreResult<Vec<Deal>> {
        (**self).fetch_all()
    }

    fn get(&self, id: u64) -> StoreResult<Deal> {
        (**self).get(id)
    }

    fn create(&self, draft: DealDraft) -> StoreResult<Deal> {
        (**self).create(draft)
    }

    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        (**self).delete(id)
    }
}

impl<T: DealStore + ?Sized> DealStore for Box<T> {
    fn fetch_all(&self) -> StoreResult<Vec<Deal>> {
        (**self).fetch_all()
    }

    fn get(&self, id: u64) -> StoreResult<Deal> {
        (**self).get(id)
    }

    fn create(&self, draft: DealDraft) -> StoreResult<Deal> {
        (**self).create(draft)
    }

    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        (**self).delete(id)
    }
}

impl<T: ContactStore + ?Sized> ContactStore for &T {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>> {
        (**self).fetch_all()
    }
}

impl<T: ContactStore + ?Sized> ContactStore for Box<T> {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>> {
        (**self).fetch_all()
    }
}
