//! Error types for the consent manager.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Please enter your name.")]
    EmptyName,

    #[error("Invalid location code: {0:?} (expected two uppercase letters, e.g. FL, GA, CA, CO, UT)")]
    InvalidLocation(String),

    #[error("At least one consent option must be selected")]
    EmptySelection,

    #[error("Consent option not available for this location: {0}")]
    UnknownOption(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error stems from user input and should lead to a re-prompt.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::InvalidLocation(_) | Self::EmptySelection | Self::UnknownOption(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
