use async_trait::async_trait;

use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::NewApplicationCommand;
use crate::domain::application::models::SoftwareApplication;
use crate::domain::errors::ContentError;

/// Port for software application operations.
#[async_trait]
pub trait ApplicationServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Validation` - Icon or name missing
    /// * `Asset` - Icon upload failed
    async fn add_application(
        &self,
        command: NewApplicationCommand,
    ) -> Result<SoftwareApplication, ContentError>;

    /// # Errors
    /// * `NotFound` - Application does not exist
    /// * `Asset` - Icon removal failed; the application is kept
    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ContentError>;

    async fn list_applications(&self) -> Result<Vec<SoftwareApplication>, ContentError>;
}

/// Persistence operations for software applications.
#[async_trait]
pub trait ApplicationRepository: Send + Sync + 'static {
    async fn create(
        &self,
        application: SoftwareApplication,
    ) -> Result<SoftwareApplication, ContentError>;

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<SoftwareApplication>, ContentError>;

    async fn list_all(&self) -> Result<Vec<SoftwareApplication>, ContentError>;

    /// # Errors
    /// * `NotFound` - Application does not exist
    async fn delete(&self, id: &ApplicationId) -> Result<(), ContentError>;
}
