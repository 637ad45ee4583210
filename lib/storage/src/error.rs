use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid field type: {0}")]
    Core(#[from] solrtype_core::Error),

    #[error("Duplicate field type id: {0}")]
    DuplicateId(String),

    #[error("Field type not found: {0}")]
    NotFound(String),

    #[error("Text file name must be a plain file name: {0:?}")]
    InvalidFileName(String),
}
