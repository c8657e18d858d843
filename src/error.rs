//! Error types for the store adapters and the pipeline board.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::deal::DealStage;
use crate::validation::ValidationErrors;

/// Failure reported by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Store rejected request: {0}")]
    Rejected(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure surfaced by a board operation. Every variant is recoverable by
/// repeating the user action.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Failed to load pipeline data: {0}")]
    Load(#[source] StoreError),

    #[error("Failed to move deal {id} to {stage}: {source}")]
    StageUpdate {
        id: u64,
        stage: DealStage,
        #[source]
        source: StoreError,
    },

    #[error("Deal {0} is not on the board")]
    UnknownDeal(u64),

    #[error("Invalid deal: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type BoardResult<T> = std::result::Result<T, BoardError>;
