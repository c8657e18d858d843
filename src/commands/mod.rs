pub mod board;
pub mod common;
pub mod contact;
pub mod deal;
pub mod init;
pub mod move_cmd;
pub mod stats;
