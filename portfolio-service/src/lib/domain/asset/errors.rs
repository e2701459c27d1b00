use thiserror::Error;

/// Error for asset host operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("Failed to upload asset: {0}")]
    UploadFailed(String),

    #[error("Failed to destroy asset {public_id}: {reason}")]
    DestroyFailed { public_id: String, reason: String },

    #[error("Unexpected response from asset host: {0}")]
    InvalidResponse(String),
}
