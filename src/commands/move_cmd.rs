use anyhow::Result;
use colored::Colorize;

use super::common::open_board;
use crate::config::Config;
use crate::models::deal::DealStage;
use crate::pipeline::DropOutcome;

/// Drag deal `id` onto the `target` column.
pub fn execute(config: &Config, id: u64, target: DealStage) -> Result<()> {
    let mut board = open_board(config)?;

    match board.move_deal(id, target)? {
        DropOutcome::Moved { deal, from } => {
            println!(
                "{} Deal moved to {} {}",
                "✓".green().bold(),
                target.label().to_lowercase(),
                format!("(#{} {}, was {})", deal.id, deal.title, from.label()).dimmed()
            );
        }
        DropOutcome::Unchanged => {
            println!("Deal #{id} is already in {}", target.label());
        }
        DropOutcome::NoDrag => {}
    }
    Ok(())
}
