extern crate thiserror;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsfParserError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("decompression failed: {0}")]
    Decompress(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("field '{field}': {reason}")]
    InvalidField {
        field: String,
        reason: &'static str,
    },
}

impl From<lzma_rs::error::Error> for IsfParserError {
    fn from(e: lzma_rs::error::Error) -> Self {
        match e {
            lzma_rs::error::Error::IoError(e) => Self::Io(e),
            e => Self::Decompress(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsfParserError>;
