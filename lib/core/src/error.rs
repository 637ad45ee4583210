use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to decode field type: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Failed to encode field type: {0}")]
    Encode(String),
}

impl Error {
    pub(crate) fn missing(field: &'static str) -> Self {
        Error::MissingField { field }
    }
}
