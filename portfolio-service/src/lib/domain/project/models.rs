use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::asset::models::Asset;
use crate::domain::asset::models::UploadedFile;
use crate::domain::errors::ContentError;

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub technologies: String,
    pub stack: String,
    pub deploy: String,
    pub banner: Asset,
    pub created_at: DateTime<Utc>,
}

/// Project unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a project ID from string.
    ///
    /// # Errors
    /// * `InvalidId` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ContentError> {
        Uuid::parse_str(s)
            .map(ProjectId)
            .map_err(|_| ContentError::InvalidId { kind: "project" })
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a project; every field and the banner are required.
#[derive(Debug, Default)]
pub struct NewProjectCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub git_repo_link: Option<String>,
    pub project_link: Option<String>,
    pub technologies: Option<String>,
    pub stack: Option<String>,
    pub deploy: Option<String>,
    pub banner: Option<UploadedFile>,
}

/// Command to update a project with optional fields.
///
/// Only provided fields are changed; a new banner replaces the old one.
#[derive(Debug, Default)]
pub struct UpdateProjectCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub git_repo_link: Option<String>,
    pub project_link: Option<String>,
    pub technologies: Option<String>,
    pub stack: Option<String>,
    pub deploy: Option<String>,
    pub banner: Option<UploadedFile>,
}
