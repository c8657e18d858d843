use anyhow::Result;
use std::io::Write;

use super::common::open_board;
use crate::config::Config;
use crate::models::filter::{FilterState, StageFilter, ValueRange};
use crate::render::render_board;

/// Render the pipeline board with the given filter-bar selection.
pub fn execute(config: &Config, stage: StageFilter, value_range: ValueRange) -> Result<()> {
    let mut board = open_board(config)?;
    board.set_filters(FilterState::new(stage, value_range));

    let mut out = std::io::stdout().lock();
    render_board(&mut out, &board)?;
    out.flush()?;
    Ok(())
}
