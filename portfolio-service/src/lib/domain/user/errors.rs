use thiserror::Error;

use crate::domain::asset::errors::AssetError;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for out-of-band notification delivery
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),

    #[error("Mail provider unreachable: {0}")]
    Transport(String),
}

/// Top-level error for all identity and credential operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input errors
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Credential errors
    #[error("{0}")]
    Unauthorized(String),

    /// Login failure; the cause (unknown email or wrong password) is never told apart.
    #[error("Invalid Email Or Password")]
    InvalidCredentials,

    #[error("Incorrect Current Password")]
    IncorrectCurrentPassword,

    #[error("{0}")]
    PasswordMismatch(String),

    #[error("Reset Password token is invalid or has been expired")]
    InvalidOrExpiredToken,

    // Domain-level errors
    #[error("{0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Failed to send e-mail: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Credential processing failed: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Credential(err.to_string())
    }
}

impl From<auth::SessionError> for UserError {
    fn from(err: auth::SessionError) -> Self {
        UserError::Credential(err.to_string())
    }
}

impl From<auth::ResetTokenError> for UserError {
    fn from(err: auth::ResetTokenError) -> Self {
        UserError::Credential(err.to_string())
    }
}
