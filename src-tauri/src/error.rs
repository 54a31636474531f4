use thiserror::Error;

/// Errors produced while turning a source file into a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file's format could not be determined or has no backend.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The backend for the detected format rejected the file.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
