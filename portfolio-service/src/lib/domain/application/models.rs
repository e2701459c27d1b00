use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::asset::models::Asset;
use crate::domain::asset::models::UploadedFile;
use crate::domain::errors::ContentError;

/// A software application the owner works with, shown with its icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareApplication {
    pub id: ApplicationId,
    pub name: String,
    pub svg: Asset,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId(pub Uuid);

impl ApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ContentError> {
        Uuid::parse_str(s)
            .map(ApplicationId)
            .map_err(|_| ContentError::InvalidId {
                kind: "application",
            })
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct NewApplicationCommand {
    pub name: Option<String>,
    pub svg: Option<UploadedFile>,
}
