//! Mapping between board models and the service's table fields.
//!
//! Custom fields carry a `_c` suffix; `Id`, `Name`, `CreatedOn` and
//! `ModifiedOn` are system fields. Lookup fields come back either as a bare
//! id or as `{ "Id": .., "Name": .. }`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::models::contact::Contact;
use crate::models::deal::{Deal, DealDraft, DealPatch, DealStage};

pub const DEAL_FIELDS: &[&str] = &[
    "Id",
    "title_c",
    "value_c",
    "stage_c",
    "probability_c",
    "contact_id_c",
    "close_date_c",
    "notes_c",
    "CreatedOn",
    "ModifiedOn",
];

pub const CONTACT_FIELDS: &[&str] = &["Id", "Name", "email_c", "phone_c", "company_c", "notes_c"];

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Lookup {
    Id(u64),
    Ref {
        #[serde(rename = "Id")]
        id: u64,
    },
}

impl Lookup {
    fn id(&self) -> u64 {
        match self {
            Lookup::Id(id) | Lookup::Ref { id } => *id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DealRecord {
    #[serde(rename = "Id")]
    id: u64,
    #[serde(rename = "title_c", default)]
    title: String,
    #[serde(rename = "value_c", default)]
    value: f64,
    #[serde(rename = "stage_c", default)]
    stage: DealStage,
    #[serde(rename = "probability_c", default)]
    probability: u8,
    #[serde(rename = "contact_id_c", default)]
    contact: Option<Lookup>,
    #[serde(rename = "close_date_c", default)]
    close_date: Option<DateTime<Utc>>,
    #[serde(rename = "notes_c", default)]
    notes: Option<String>,
    #[serde(rename = "CreatedOn", default)]
    created_on: Option<DateTime<Utc>>,
    #[serde(rename = "ModifiedOn", default)]
    modified_on: Option<DateTime<Utc>>,
}

impl From<DealRecord> for Deal {
    fn from(record: DealRecord) -> Self {
        Deal {
            id: record.id,
            title: record.title,
            value: record.value,
            stage: record.stage,
            probability: record.probability,
            contact_id: record.contact.as_ref().map(Lookup::id),
            close_date: record.close_date,
            notes: record.notes.filter(|n| !n.is_empty()),
            created_at: record.created_on,
            updated_at: record.modified_on,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ContactRecord {
    #[serde(rename = "Id")]
    id: u64,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "email_c", default)]
    email: Option<String>,
    #[serde(rename = "phone_c", default)]
    phone: Option<String>,
    #[serde(rename = "company_c", default)]
    company: Option<String>,
    #[serde(rename = "notes_c", default)]
    notes: Option<String>,
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Contact {
            id: record.id,
            name: record.name,
            email: record.email.unwrap_or_default(),
            phone: record.phone.filter(|p| !p.is_empty()),
            company: record.company.unwrap_or_default(),
            notes: record.notes.filter(|n| !n.is_empty()),
            created_at: None,
        }
    }
}

pub fn deal_from_value(value: Value) -> serde_json::Result<Deal> {
    serde_json::from_value::<DealRecord>(value).map(Deal::from)
}

pub fn contact_from_value(value: Value) -> serde_json::Result<Contact> {
    serde_json::from_value::<ContactRecord>(value).map(Contact::from)
}

/// Fields sent when creating a deal.
pub fn draft_to_fields(draft: &DealDraft) -> Value {
    json!({
        "Name": draft.title.trim(),
        "title_c": draft.title.trim(),
        "value_c": draft.value,
        "stage_c": draft.stage,
        "probability_c": draft.probability,
        "contact_id_c": draft.contact_id,
        "close_date_c": draft.close_date,
        "notes_c": draft.notes.clone().unwrap_or_default(),
    })
}

/// Fields sent for an update: only the fields the patch sets, plus `Id`.
pub fn patch_to_fields(id: u64, patch: &DealPatch) -> Value {
    let mut fields = Map::new();
    fields.insert("Id".to_string(), json!(id));
    if let Some(title) = &patch.title {
        fields.insert("Name".to_string(), json!(title));
        fields.insert("title_c".to_string(), json!(title));
    }
    if let Some(value) = patch.value {
        fields.insert("value_c".to_string(), json!(value));
    }
    if let Some(stage) = patch.stage {
        fields.insert("stage_c".to_string(), json!(stage));
    }
    if let Some(probability) = patch.probability {
        fields.insert("probability_c".to_string(), json!(probability));
    }
    if let Some(contact_id) = patch.contact_id {
        fields.insert("contact_id_c".to_string(), json!(contact_id));
    }
    if let Some(close_date) = patch.close_date {
        fields.insert("close_date_c".to_string(), json!(close_date));
    }
    if let Some(notes) = &patch.notes {
        fields.insert("notes_c".to_string(), json!(notes));
    }
    Value::Object(fields)
}
