//! Config file to board wiring

use serial_test::serial;
use std::env;
use std::fs;

use dealboard::commands::common::{open_board, open_stores};
use dealboard::config::{Backend, Config, ENV_BACKEND, ENV_DATA_DIR};
use dealboard::models::deal::DealStage;
use dealboard::store::FileDealStore;

use super::helpers::*;

fn clear_env() {
    env::remove_var(ENV_DATA_DIR);
    env::remove_var(ENV_BACKEND);
}

#[test]
#[serial]
fn test_config_file_points_board_at_data_dir() {
    clear_env();
    let (temp, data_dir) = init_data_dir();
    FileDealStore::in_data_dir(&data_dir)
        .replace_all(&[deal(1, "Renewal", 900.0, DealStage::Negotiation, None)])
        .unwrap();

    let config_path = temp.path().join("dealboard.toml");
    fs::write(
        &config_path,
        format!(
            "[store]\nbackend = \"file\"\ndata_dir = {:?}\n",
            data_dir.root().display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    let board = open_board(&config).unwrap();

    assert_eq!(board.deals().len(), 1);
    assert_eq!(board.stage_total(DealStage::Negotiation), 900.0);
}

#[test]
#[serial]
fn test_missing_data_dir_asks_for_init() {
    clear_env();
    let temp = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.store.data_dir = temp.path().join("absent");

    let err = open_board(&config).err().expect("missing data dir should fail");

    assert!(format!("{err:#}").contains("dealboard init"));
}

#[test]
#[serial]
fn test_remote_backend_requires_connection_settings() {
    clear_env();
    let mut config = Config::default();
    config.store.backend = Backend::Remote;

    let err = open_stores(&config).err().expect("remote settings are required");

    assert!(err.to_string().contains("base_url"));
}

#[test]
#[serial]
fn test_data_dir_env_overrides_config_file() {
    clear_env();
    let (temp, data_dir) = init_data_dir();
    let config_path = temp.path().join("dealboard.toml");
    fs::write(&config_path, "[store]\ndata_dir = \"elsewhere\"\n").unwrap();

    env::set_var(ENV_DATA_DIR, data_dir.root());
    let config = Config::load(Some(&config_path));
    clear_env();

    assert_eq!(config.unwrap().store.data_dir, data_dir.root());
}
