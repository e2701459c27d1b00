use thiserror::Error;

/// Error type for reset token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetTokenError {
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Reset expiry out of range")]
    ExpiryOutOfRange,
}
