use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::ports::AssetStore;
use crate::domain::errors::required;
use crate::domain::errors::ContentError;
use crate::domain::project::models::NewProjectCommand;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::UpdateProjectCommand;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::project::ports::ProjectServicePort;

pub struct ProjectService<PR, AS>
where
    PR: ProjectRepository,
    AS: AssetStore,
{
    repository: Arc<PR>,
    assets: Arc<AS>,
}

impl<PR, AS> ProjectService<PR, AS>
where
    PR: ProjectRepository,
    AS: AssetStore,
{
    pub fn new(repository: Arc<PR>, assets: Arc<AS>) -> Self {
        Self { repository, assets }
    }
}

#[async_trait]
impl<PR, AS> ProjectServicePort for ProjectService<PR, AS>
where
    PR: ProjectRepository,
    AS: AssetStore,
{
    async fn add_project(&self, command: NewProjectCommand) -> Result<Project, ContentError> {
        let banner = command.banner.ok_or_else(|| {
            ContentError::Validation("Project banner image is required!".to_string())
        })?;

        let all_fields = || ContentError::Validation("All fields are required!".to_string());
        let title = required(command.title).ok_or_else(all_fields)?;
        let description = required(command.description).ok_or_else(all_fields)?;
        let git_repo_link = required(command.git_repo_link).ok_or_else(all_fields)?;
        let project_link = required(command.project_link).ok_or_else(all_fields)?;
        let technologies = required(command.technologies).ok_or_else(all_fields)?;
        let stack = required(command.stack).ok_or_else(all_fields)?;
        let deploy = required(command.deploy).ok_or_else(all_fields)?;

        let banner = self
            .assets
            .upload(banner, AssetFolder::ProjectBanners)
            .await?;

        let project = Project {
            id: ProjectId::new(),
            title,
            description,
            git_repo_link,
            project_link,
            technologies,
            stack,
            deploy,
            banner,
            created_at: Utc::now(),
        };

        let created = self.repository.create(project).await?;
        tracing::info!(project_id = %created.id, "Project added");

        Ok(created)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ContentError> {
        let project = self.get_project(id).await?;

        self.assets.destroy(&project.banner.public_id).await?;
        self.repository.delete(id).await?;

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
    ) -> Result<Project, ContentError> {
        let mut project = self.get_project(id).await?;

        if let Some(banner) = command.banner {
            self.assets.destroy(&project.banner.public_id).await?;
            project.banner = self
                .assets
                .upload(banner, AssetFolder::ProjectBanners)
                .await?;
        }

        if let Some(title) = required(command.title) {
            project.title = title;
        }
        if let Some(description) = required(command.description) {
            project.description = description;
        }
        if let Some(git_repo_link) = required(command.git_repo_link) {
            project.git_repo_link = git_repo_link;
        }
        if let Some(project_link) = required(command.project_link) {
            project.project_link = project_link;
        }
        if let Some(technologies) = required(command.technologies) {
            project.technologies = technologies;
        }
        if let Some(stack) = required(command.stack) {
            project.stack = stack;
        }
        if let Some(deploy) = required(command.deploy) {
            project.deploy = deploy;
        }

        self.repository.update(project).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ContentError> {
        self.repository.list_all().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ContentError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Project"))
    }
}
