//! Request and response shapes of the hosted record-query service.
//!
//! Every call names a table and the fields it wants back; fetches may carry
//! ordering and paging.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

impl FieldSpec {
    pub fn named(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

/// Body of a fetch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchParams {
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "orderBy", skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "pagingInfo", skip_serializing_if = "Option::is_none")]
    pub paging: Option<PagingInfo>,
}

impl FetchParams {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| FieldSpec::named(f)).collect(),
            order_by: Vec::new(),
            paging: None,
        }
    }

    pub fn order_by(mut self, field: &str, descending: bool) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.to_string(),
            sort_type: if descending { "DESC" } else { "ASC" }.to_string(),
        });
        self
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.paging = Some(PagingInfo { limit, offset });
        self
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordsBody {
    pub records: Vec<Value>,
}

/// Body of a delete request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteBody {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<u64>,
}

/// Per-record outcome of a create, update or delete.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldFailure>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldFailure {
    #[serde(rename = "fieldLabel", default)]
    pub field_label: String,
    #[serde(default)]
    pub message: String,
}

/// Envelope every response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub results: Vec<RecordResult>,
}

impl Envelope {
    /// Turn a rejected envelope into its message.
    pub fn into_success(self) -> Result<Self, String> {
        if self.success {
            Ok(self)
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "request failed without a message".to_string()))
        }
    }

    /// Data of the single record a mutation touched.
    pub fn single_result(self) -> Result<Option<Value>, String> {
        let envelope = self.into_success()?;
        let Some(result) = envelope.results.into_iter().next() else {
            return Ok(envelope.data);
        };
        if result.success {
            return Ok(result.data);
        }
        let mut reasons: Vec<String> = result
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field_label, e.message))
            .collect();
        if let Some(message) = result.message {
            reasons.insert(0, message);
        }
        if reasons.is_empty() {
            reasons.push("record rejected".to_string());
        }
        Err(reasons.join("; "))
    }
}
