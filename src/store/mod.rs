//! Local JSON persistence.
//!
//! Each document is one pretty-printed file in the data directory. Loads
//! never fail; saves replace the file atomically. Concurrent writers are
//! not coordinated: the last save wins.

pub mod chat_log;
pub mod json_store;
pub mod profile_store;
pub mod uploads;

pub use chat_log::{ChatLog, RecordOutcome};
pub use json_store::{load_document, save_document};
pub use profile_store::{resolve_position, ListItem, ProfileStore};
pub use uploads::UploadStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to replace {path}: {reason}")]
    Persist { path: String, reason: String },
}
