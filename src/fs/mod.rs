pub mod data_dir;
pub mod locking;
