use thiserror::Error;

use crate::model::RecordId;

#[derive(Error, Debug)]
pub enum ListqError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Record already exists: {0}")]
    DuplicateRecord(RecordId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Debouncer has stopped")]
    DebouncerStopped,

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ListqError>;
