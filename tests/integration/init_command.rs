//! `init` seeding and re-initialization

use dealboard::commands::init;
use dealboard::config::Backend;
use dealboard::fs::data_dir::DataDir;
use dealboard::models::deal::DealStage;
use tempfile::TempDir;

use super::helpers::*;

#[test]
fn test_init_seeds_sample_pipeline() {
    let temp = TempDir::new().unwrap();
    let data_dir = DataDir::new(temp.path().join(".dealboard"));

    init::execute(&config_for(&data_dir), false, false).unwrap();

    let board = reopen(&data_dir);
    assert_eq!(board.deals().len(), 6);
    assert_eq!(board.contacts().len(), 4);
    for deal in board.deals() {
        assert_ne!(board.contact_name(deal), "No contact");
    }
    assert_eq!(board.stage_total(DealStage::Negotiation), 120000.0);
    assert!(data_dir.root().join("README.md").exists());
}

#[test]
fn test_init_empty_creates_blank_files() {
    let temp = TempDir::new().unwrap();
    let data_dir = DataDir::new(temp.path().join(".dealboard"));

    init::execute(&config_for(&data_dir), false, true).unwrap();

    let board = reopen(&data_dir);
    assert!(board.deals().is_empty());
    assert!(board.contacts().is_empty());
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let (_temp, data_dir) = init_data_dir();
    let config = config_for(&data_dir);

    let err = init::execute(&config, false, false).unwrap_err();
    assert!(err.to_string().contains("--force"));

    init::execute(&config, true, false).unwrap();
    assert_eq!(reopen(&data_dir).deals().len(), 6);
}

#[test]
fn test_init_rejects_remote_backend() {
    let (_temp, data_dir) = init_data_dir();
    let mut config = config_for(&data_dir);
    config.store.backend = Backend::Remote;

    assert!(init::execute(&config, false, false).is_err());
}
