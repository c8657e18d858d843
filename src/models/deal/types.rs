use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sales opportunity tracked on the pipeline board.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; the client
/// never invents them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(alias = "Id")]
    pub id: u64,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    #[serde(default)]
    pub probability: u8,
    /// Weak reference to a contact, used for display only.
    #[serde(default)]
    pub contact_id: Option<u64>,
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Pipeline stage of a deal.
///
/// The six stages form a fixed, ordered set. Any stage can be reached from
/// any other in a single move; there are no terminal stages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DealStage {
    #[default]
    #[serde(rename = "new")]
    New,
    #[serde(rename = "qualified")]
    Qualified,
    #[serde(rename = "proposal")]
    Proposal,
    #[serde(rename = "negotiation")]
    Negotiation,
    #[serde(rename = "closed-won")]
    ClosedWon,
    #[serde(rename = "closed-lost")]
    ClosedLost,
}

impl DealStage {
    /// All stages in board display order.
    pub const ALL: [DealStage; 6] = [
        DealStage::New,
        DealStage::Qualified,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::ClosedWon,
        DealStage::ClosedLost,
    ];

    /// Wire form, as stored in the `stage` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::New => "new",
            DealStage::Qualified => "qualified",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::ClosedWon => "closed-won",
            DealStage::ClosedLost => "closed-lost",
        }
    }

    /// Human-readable column title.
    pub fn label(&self) -> &'static str {
        match self {
            DealStage::New => "New",
            DealStage::Qualified => "Qualified",
            DealStage::Proposal => "Proposal",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Closed Won",
            DealStage::ClosedLost => "Closed Lost",
        }
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DealStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid stage: {s}. Use: new, qualified, proposal, negotiation, closed-won, closed-lost"
                )
            })
    }
}

/// Partial update applied by the store. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DealStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Form data for creating or editing a deal.
#[derive(Debug, Clone, PartialEq)]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub probability: u8,
    pub contact_id: Option<u64>,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Colour band for a deal's win probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}
