use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::multipart::MultipartForm;
use super::ApiError;
use super::ApiSuccess;
use super::AssetData;
use super::MessageData;
use crate::domain::project::models::NewProjectCommand;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::UpdateProjectCommand;
use crate::domain::project::ports::ProjectServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiSuccess<ProjectData>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let command = NewProjectCommand {
        title: form.text("title"),
        description: form.text("description"),
        git_repo_link: form.text("gitRepoLink"),
        project_link: form.text("projectLink"),
        technologies: form.text("technologies"),
        stack: form.text("stack"),
        deploy: form.text("deploy"),
        banner: form.file("projectBanner"),
    };

    state
        .project_service
        .add_project(command)
        .await
        .map_err(ApiError::from)
        .map(|ref project| ApiSuccess::new(StatusCode::CREATED, project.into()))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<ApiSuccess<ProjectData>, ApiError> {
    let id = ProjectId::from_string(&id)?;
    let mut form = MultipartForm::read(multipart).await?;
    let command = UpdateProjectCommand {
        title: form.text("title"),
        description: form.text("description"),
        git_repo_link: form.text("gitRepoLink"),
        project_link: form.text("projectLink"),
        technologies: form.text("technologies"),
        stack: form.text("stack"),
        deploy: form.text("deploy"),
        banner: form.file("projectBanner"),
    };

    state
        .project_service
        .update_project(&id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref project| ApiSuccess::new(StatusCode::OK, project.into()))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let id = ProjectId::from_string(&id)?;

    state
        .project_service
        .delete_project(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Project deleted successfully!"),
            )
        })
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProjectData>>, ApiError> {
    state
        .project_service
        .list_projects()
        .await
        .map_err(ApiError::from)
        .map(|projects| ApiSuccess::new(StatusCode::OK, projects.iter().map(Into::into).collect()))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ProjectData>, ApiError> {
    let id = ProjectId::from_string(&id)?;

    state
        .project_service
        .get_project(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref project| ApiSuccess::new(StatusCode::OK, project.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub technologies: String,
    pub stack: String,
    pub deploy: String,
    pub banner: AssetData,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            title: project.title.clone(),
            description: project.description.clone(),
            git_repo_link: project.git_repo_link.clone(),
            project_link: project.project_link.clone(),
            technologies: project.technologies.clone(),
            stack: project.stack.clone(),
            deploy: project.deploy.clone(),
            banner: (&project.banner).into(),
            created_at: project.created_at,
        }
    }
}
