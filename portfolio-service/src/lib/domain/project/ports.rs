use async_trait::async_trait;

use crate::domain::errors::ContentError;
use crate::domain::project::models::NewProjectCommand;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::UpdateProjectCommand;

/// Port for project operations.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Add a project and upload its banner.
    ///
    /// # Errors
    /// * `Validation` - Banner or a field is missing
    /// * `Asset` - Banner upload failed
    /// * `DatabaseError` - Database operation failed
    async fn add_project(&self, command: NewProjectCommand) -> Result<Project, ContentError>;

    /// Delete a project and its banner.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Asset` - Banner removal failed; the project is kept
    /// * `DatabaseError` - Database operation failed
    async fn delete_project(&self, id: &ProjectId) -> Result<(), ContentError>;

    /// Update a project with optional fields and banner.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Asset` - Replacing the banner failed
    /// * `DatabaseError` - Database operation failed
    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
    ) -> Result<Project, ContentError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ContentError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ContentError>;
}

/// Persistence operations for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn create(&self, project: Project) -> Result<Project, ContentError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ContentError>;

    /// All projects, oldest first.
    async fn list_all(&self) -> Result<Vec<Project>, ContentError>;

    /// Overwrite a stored project.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn update(&self, project: Project) -> Result<Project, ContentError>;

    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn delete(&self, id: &ProjectId) -> Result<(), ContentError>;
}
