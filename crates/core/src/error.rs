//! Error taxonomy shared by every tool.
//!
//! Core functions only ever produce [`Error::InvalidInput`] and
//! [`Error::UnsupportedAlgorithm`]. The remaining variants belong to the
//! shell's I/O boundary but live here so every failure a tool can report is
//! classified in one place.

/// Error type for devkit operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read file: {0}")]
    FileReadFailure(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
