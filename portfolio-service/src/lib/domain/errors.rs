use thiserror::Error;

use crate::domain::asset::errors::AssetError;

/// Error shared by the portfolio content aggregates.
///
/// Projects, skills, timeline entries, software applications and messages
/// all fail in the same handful of ways, so they share one error type.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid {kind} ID format!")]
    InvalidId { kind: &'static str },

    #[error("{0} not found!")]
    NotFound(&'static str),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<anyhow::Error> for ContentError {
    fn from(err: anyhow::Error) -> Self {
        ContentError::DatabaseError(err.to_string())
    }
}

/// Take a required text input, treating blank values as absent.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
