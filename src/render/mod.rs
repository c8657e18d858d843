pub mod board;
pub mod card;
pub mod format;
pub mod stats;

pub use board::render_board;
pub use card::{render_card, render_row};
pub use format::{format_currency, format_percent};
pub use stats::{render_contacts, render_stats};
