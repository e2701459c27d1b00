use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::NewApplicationCommand;
use crate::domain::application::models::SoftwareApplication;
use crate::domain::application::ports::ApplicationRepository;
use crate::domain::application::ports::ApplicationServicePort;
use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::ports::AssetStore;
use crate::domain::errors::required;
use crate::domain::errors::ContentError;

pub struct ApplicationService<AR, AS>
where
    AR: ApplicationRepository,
    AS: AssetStore,
{
    repository: Arc<AR>,
    assets: Arc<AS>,
}

impl<AR, AS> ApplicationService<AR, AS>
where
    AR: ApplicationRepository,
    AS: AssetStore,
{
    pub fn new(repository: Arc<AR>, assets: Arc<AS>) -> Self {
        Self { repository, assets }
    }
}

#[async_trait]
impl<AR, AS> ApplicationServicePort for ApplicationService<AR, AS>
where
    AR: ApplicationRepository,
    AS: AssetStore,
{
    async fn add_application(
        &self,
        command: NewApplicationCommand,
    ) -> Result<SoftwareApplication, ContentError> {
        let svg = command.svg.ok_or_else(|| {
            ContentError::Validation("Software Application Icon SVG is required!".to_string())
        })?;
        let name = required(command.name).ok_or_else(|| {
            ContentError::Validation("Software's Name is required!".to_string())
        })?;

        let svg = self
            .assets
            .upload(svg, AssetFolder::SoftwareApplications)
            .await?;

        let application = SoftwareApplication {
            id: ApplicationId::new(),
            name,
            svg,
            created_at: Utc::now(),
        };

        let created = self.repository.create(application).await?;
        tracing::info!(application_id = %created.id, "Software application added");

        Ok(created)
    }

    async fn delete_application(&self, id: &ApplicationId) -> Result<(), ContentError> {
        let application = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Application"))?;

        self.assets.destroy(&application.svg.public_id).await?;
        self.repository.delete(id).await
    }

    async fn list_applications(&self) -> Result<Vec<SoftwareApplication>, ContentError> {
        self.repository.list_all().await
    }
}
