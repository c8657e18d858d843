//! Store and board construction shared by the commands

use anyhow::{Context, Result};

use crate::config::{Backend, Config};
use crate::fs::data_dir::DataDir;
use crate::pipeline::PipelineBoard;
use crate::store::{
    ContactStore, DealStore, FileContactStore, FileDealStore, RemoteContactStore, RemoteDealStore,
};

pub type Board = PipelineBoard<Box<dyn DealStore>, Box<dyn ContactStore>>;

/// Build the deal and contact stores selected by the config.
pub fn open_stores(config: &Config) -> Result<(Box<dyn DealStore>, Box<dyn ContactStore>)> {
    match config.store.backend {
        Backend::File => {
            let data_dir = DataDir::new(&config.store.data_dir);
            data_dir.load()?;
            Ok((
                Box::new(FileDealStore::in_data_dir(&data_dir)),
                Box::new(FileContactStore::in_data_dir(&data_dir)),
            ))
        }
        Backend::Remote => {
            config.remote.validate()?;
            let deals = RemoteDealStore::new(config.remote.clone())
                .context("Failed to create record service client")?;
            let contacts = RemoteContactStore::new(config.remote.clone())
                .context("Failed to create record service client")?;
            Ok((Box::new(deals), Box::new(contacts)))
        }
    }
}

/// Open and load the board. A load failure is reported with a retry hint.
pub fn open_board(config: &Config) -> Result<Board> {
    let (deals, contacts) = open_stores(config)?;
    let mut board = PipelineBoard::new(deals, contacts);
    board
        .load()
        .context("Could not load the pipeline. Re-run the command to retry")?;
    Ok(board)
}
