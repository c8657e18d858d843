use anyhow::Result;

use super::common::open_board;
use crate::config::Config;
use crate::render::render_stats;

pub fn execute(config: &Config) -> Result<()> {
    let board = open_board(config)?;

    let mut out = std::io::stdout().lock();
    render_stats(&mut out, &board.stats())?;
    Ok(())
}
