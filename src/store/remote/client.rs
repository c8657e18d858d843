//! Blocking HTTP client for the record-query service.
//!
//! Provides client creation with timeouts and the five record calls the
//! stores need. Every call is a single request; nothing here retries.

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::query::{DeleteBody, Envelope, FetchParams, RecordsBody};
use crate::config::RemoteConfig;
use crate::error::{StoreError, StoreResult};

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with connect and whole-request timeouts.
fn create_http_client() -> StoreResult<Client> {
    Ok(Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("dealboard/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

#[derive(Debug, Clone)]
pub struct RecordClient {
    http: Client,
    config: RemoteConfig,
}

impl RecordClient {
    pub fn new(config: RemoteConfig) -> StoreResult<Self> {
        Ok(Self {
            http: create_http_client()?,
            config,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.config.page_size.max(1)
    }

    fn records_url(&self, table: &str) -> String {
        format!(
            "{}/projects/{}/tables/{}/records",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            table
        )
    }

    fn send(&self, request: RequestBuilder, what: &str) -> StoreResult<Envelope> {
        let response = request.bearer_auth(&self.config.public_key).send()?;
        let status = response.status();
        debug!(%status, what, "record service responded");

        let body = response.text()?;
        match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => envelope.into_success().map_err(StoreError::Rejected),
            Err(_) if !status.is_success() => Err(StoreError::Rejected(format!(
                "{what}: HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// One page of records matching `params`.
    pub fn fetch(&self, table: &str, params: &FetchParams) -> StoreResult<Vec<Value>> {
        let url = format!("{}/query", self.records_url(table));
        let envelope = self.send(self.http.post(url).json(params), "fetch records")?;
        match envelope.data {
            Some(Value::Array(records)) => Ok(records),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(StoreError::Rejected(format!(
                "fetch records: expected an array, got {other}"
            ))),
        }
    }

    /// Every record, following pages until one comes back with a size other
    /// than the page size.
    ///
    /// A page larger than requested means the service ignored paging and sent
    /// everything at once. A service that keeps sending full pages past
    /// `max_pages` is rejected.
    pub fn fetch_all(&self, table: &str, params: FetchParams) -> StoreResult<Vec<Value>> {
        let limit = self.page_size();
        let max_pages = self.config.max_pages.max(1);
        let mut offset = 0u32;
        let mut all = Vec::new();
        for _ in 0..max_pages {
            let page = self.fetch(table, &params.clone().page(limit, offset))?;
            let count = page.len();
            all.extend(page);
            if count != limit as usize {
                debug!(table, count = all.len(), "fetched all records");
                return Ok(all);
            }
            offset = offset.saturating_add(limit);
        }
        Err(StoreError::Rejected(format!(
            "fetch records: {table} still returned full pages after {max_pages} pages of {limit}"
        )))
    }

    pub fn get_by_id(&self, table: &str, id: u64, params: &FetchParams) -> StoreResult<Value> {
        let url = format!("{}/{id}/query", self.records_url(table));
        let envelope = self.send(self.http.post(url).json(params), "get record")?;
        match envelope.data {
            Some(Value::Null) | None => Err(StoreError::Rejected(format!(
                "get record: {table} {id} returned no data"
            ))),
            Some(record) => Ok(record),
        }
    }

    pub fn create(&self, table: &str, fields: Value) -> StoreResult<Value> {
        let body = RecordsBody {
            records: vec![fields],
        };
        let envelope = self.send(
            self.http.post(self.records_url(table)).json(&body),
            "create record",
        )?;
        single_record(envelope, "create record")
    }

    pub fn update(&self, table: &str, fields: Value) -> StoreResult<Value> {
        let body = RecordsBody {
            records: vec![fields],
        };
        let envelope = self.send(
            self.http.patch(self.records_url(table)).json(&body),
            "update record",
        )?;
        single_record(envelope, "update record")
    }

    pub fn delete(&self, table: &str, id: u64) -> StoreResult<bool> {
        let body = DeleteBody {
            record_ids: vec![id],
        };
        let envelope = self.send(
            self.http.delete(self.records_url(table)).json(&body),
            "delete record",
        )?;
        envelope
            .single_result()
            .map(|_| true)
            .map_err(StoreError::Rejected)
    }
}

fn single_record(envelope: Envelope, what: &str) -> StoreResult<Value> {
    envelope
        .single_result()
        .map_err(StoreError::Rejected)?
        .ok_or_else(|| StoreError::Rejected(format!("{what}: response carried no record")))
}
