//! Shared test helpers for file-store integration tests

use chrono::Utc;
use tempfile::TempDir;

use dealboard::config::Config;
use dealboard::fs::data_dir::DataDir;
use dealboard::models::contact::Contact;
use dealboard::models::deal::{Deal, DealDraft, DealStage};
use dealboard::pipeline::PipelineBoard;
use dealboard::store::{FileContactStore, FileDealStore};

pub type FileBoard = PipelineBoard<FileDealStore, FileContactStore>;

/// Test helper: Create an initialized, empty data directory
pub fn init_data_dir() -> (TempDir, DataDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let data_dir = DataDir::new(temp_dir.path().join(".dealboard"));
    data_dir
        .initialize(false)
        .expect("Failed to initialize data dir");
    (temp_dir, data_dir)
}

/// Test helper: Config pointing the file backend at `data_dir`
pub fn config_for(data_dir: &DataDir) -> Config {
    let mut config = Config::default();
    config.store.data_dir = data_dir.root().to_path_buf();
    config
}

pub fn deal(id: u64, title: &str, value: f64, stage: DealStage, contact_id: Option<u64>) -> Deal {
    let draft = DealDraft {
        stage,
        contact_id,
        ..DealDraft::new(title, value)
    };
    Deal::from_draft(id, draft, Utc::now())
}

pub fn contact(id: u64, name: &str) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: None,
        company: "Example Co".to_string(),
        notes: None,
        created_at: None,
    }
}

/// Test helper: Write records to the data dir and open a loaded board on it
pub fn seeded_board(data_dir: &DataDir, deals: &[Deal], contacts: &[Contact]) -> FileBoard {
    let deal_store = FileDealStore::in_data_dir(data_dir);
    let contact_store = FileContactStore::in_data_dir(data_dir);
    deal_store.replace_all(deals).expect("Failed to seed deals");
    contact_store
        .replace_all(contacts)
        .expect("Failed to seed contacts");

    let mut board = PipelineBoard::new(deal_store, contact_store);
    board.load().expect("Failed to load board");
    board
}

/// Test helper: A fresh board over the same files, loaded from disk
pub fn reopen(data_dir: &DataDir) -> FileBoard {
    let mut board = PipelineBoard::new(
        FileDealStore::in_data_dir(data_dir),
        FileContactStore::in_data_dir(data_dir),
    );
    board.load().expect("Failed to reload board");
    board
}
