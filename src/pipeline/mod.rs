//! Pipeline board: filtered stage columns and drag-and-drop stage moves
//!
//! This module handles:
//! - Loading deals and contacts from their stores
//! - Deriving the filtered, per-stage view the board renders
//! - Moving a dragged deal to another stage through the deal store

mod board;
mod stats;
mod view;


pub use board::{DropOutcome, PipelineBoard};
pub use stats::PipelineStats;
pub use view::{columns, group_by_stage, stage_total, StageColumn};
