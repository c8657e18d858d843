//! Sales pipeline board.
//!
//! Deals move through six stages. [`pipeline::PipelineBoard`] caches deals and
//! contacts from injected [`store`] adapters, derives the filtered per-stage
//! view with totals, and turns a drag-and-drop gesture into a single
//! stage update against the deal store.

pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod fs;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod validation;
