//! JSON-file stores rooted in a data directory.
//!
//! Each entity lives in one JSON array. Reads take a shared lock, mutations
//! run as a single read-modify-write under an exclusive lock.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::records;
use super::{ContactStore, DealStore};
use crate::error::{StoreError, StoreResult};
use crate::fs::data_dir::DataDir;
use crate::fs::locking::{locked_read, locked_update};
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch};

/// Error raised inside a locked update: either the file itself or the record
/// operation failed.
enum UpdateError {
    Io(io::Error),
    Store(StoreError),
}

impl From<io::Error> for UpdateError {
    fn from(err: io::Error) -> Self {
        UpdateError::Io(err)
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = locked_read(path).map_err(|e| StoreError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

#[derive(Debug, Clone)]
pub struct FileDealStore {
    path: PathBuf,
}

impl FileDealStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir(data_dir: &DataDir) -> Self {
        Self::new(data_dir.deals_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with the given records. Used to seed sample data.
    pub fn replace_all(&self, deals: &[Deal]) -> StoreResult<()> {
        self.mutate(|current| {
            *current = deals.to_vec();
            Ok(())
        })
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut Vec<Deal>) -> StoreResult<T>) -> StoreResult<T> {
        let result = locked_update(&self.path, |content| {
            let mut deals: Vec<Deal> = if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(content).map_err(|e| UpdateError::Store(e.into()))?
            };
            let value = op(&mut deals).map_err(UpdateError::Store)?;
            let serialized = serde_json::to_string_pretty(&deals)
                .map_err(|e| UpdateError::Store(e.into()))?;
            Ok((serialized + "\n", value))
        });

        result.map_err(|err| match err {
            UpdateError::Io(e) => StoreError::io(&self.path, e),
            UpdateError::Store(e) => e,
        })
    }
}

impl DealStore for FileDealStore {
    fn fetch_all(&self) -> StoreResult<Vec<Deal>> {
        read_records(&self.path)
    }

    fn get(&self, id: u64) -> StoreResult<Deal> {
        records::find(&self.fetch_all()?, id)
    }

    fn create(&self, draft: DealDraft) -> StoreResult<Deal> {
        let deal = self.mutate(|deals| Ok(records::create(deals, draft)))?;
        debug!(id = deal.id, path = %self.path.display(), "created deal");
        Ok(deal)
    }

    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal> {
        let deal = self.mutate(|deals| records::update(deals, id, patch))?;
        debug!(id, path = %self.path.display(), "updated deal");
        Ok(deal)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        let removed = self.mutate(|deals| records::delete(deals, id))?;
        debug!(id, path = %self.path.display(), "deleted deal");
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
pub struct FileContactStore {
    path: PathBuf,
}

impl FileContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir(data_dir: &DataDir) -> Self {
        Self::new(data_dir.contacts_path())
    }

    /// Overwrite the file with the given contacts. Used to seed sample data.
    pub fn replace_all(&self, contacts: &[Contact]) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(contacts)? + "\n";
        crate::fs::locking::locked_write(&self.path, &serialized)
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

impl ContactStore for FileContactStore {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>> {
        read_records(&self.path)
    }
}
