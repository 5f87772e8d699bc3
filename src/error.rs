use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaddingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Text must be encoded to bytes before padding")]
    Encoding,

    #[error("Context was already finalized")]
    AlreadyFinalized,

    /// Deliberately carries no detail: every malformed pad reports the same error.
    #[error("Invalid padding bytes")]
    InvalidPadding,

    #[error("Hex decoding error: {0}")]
    Hex(String),
}

impl From<hex::FromHexError> for PaddingError {
    fn from(e: hex::FromHexError) -> Self {
        PaddingError::Hex(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaddingError>;
