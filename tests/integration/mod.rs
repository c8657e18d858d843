//! Integration tests for the pipeline board over the file-backed store
//!
//! These tests drive the board, the commands and the config loader against
//! real data directories in temporary locations.

pub mod board_file_store;
pub mod config_loading;
pub mod helpers;
pub mod init_command;
