//! Stores backed by the hosted record-query service.

mod client;
pub mod fields;
pub mod query;

#[cfg(test)]
mod tests;

use tracing::debug;

use super::{ContactStore, DealStore};
use crate::config::RemoteConfig;
use crate::error::StoreResult;
use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch};

pub use client::RecordClient;
use fields::{
    contact_from_value, deal_from_value, draft_to_fields, patch_to_fields, CONTACT_FIELDS,
    DEAL_FIELDS,
};
use query::FetchParams;

#[derive(Debug, Clone)]
pub struct RemoteDealStore {
    client: RecordClient,
    table: String,
}

impl RemoteDealStore {
    pub fn new(config: RemoteConfig) -> StoreResult<Self> {
        let table = config.deals_table.clone();
        Ok(Self {
            client: RecordClient::new(config)?,
            table,
        })
    }
}

impl DealStore for RemoteDealStore {
    fn fetch_all(&self) -> StoreResult<Vec<Deal>> {
        let params = FetchParams::new(DEAL_FIELDS).order_by("Id", false);
        self.client
            .fetch_all(&self.table, params)?
            .into_iter()
            .map(|record| deal_from_value(record).map_err(Into::into))
            .collect()
    }

    fn get(&self, id: u64) -> StoreResult<Deal> {
        let record = self
            .client
            .get_by_id(&self.table, id, &FetchParams::new(DEAL_FIELDS))?;
        Ok(deal_from_value(record)?)
    }

    fn create(&self, draft: DealDraft) -> StoreResult<Deal> {
        let record = self.client.create(&self.table, draft_to_fields(&draft))?;
        let deal = deal_from_value(record)?;
        debug!(id = deal.id, table = %self.table, "created remote deal");
        Ok(deal)
    }

    fn update(&self, id: u64, patch: &DealPatch) -> StoreResult<Deal> {
        let record = self.client.update(&self.table, patch_to_fields(id, patch))?;
        Ok(deal_from_value(record)?)
    }

    fn delete(&self, id: u64) -> StoreResult<bool> {
        self.client.delete(&self.table, id)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteContactStore {
    client: RecordClient,
    table: String,
}

impl RemoteContactStore {
    pub fn new(config: RemoteConfig) -> StoreResult<Self> {
        let table = config.contacts_table.clone();
        Ok(Self {
            client: RecordClient::new(config)?,
            table,
        })
    }
}

impl ContactStore for RemoteContactStore {
    fn fetch_all(&self) -> StoreResult<Vec<Contact>> {
        let params = FetchParams::new(CONTACT_FIELDS).order_by("Name", false);
        self.client
            .fetch_all(&self.table, params)?
            .into_iter()
            .map(|record| contact_from_value(record).map_err(Into::into))
            .collect()
    }
}
