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
use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::NewApplicationCommand;
use crate::domain::application::models::SoftwareApplication;
use crate::domain::application::ports::ApplicationServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiSuccess<ApplicationData>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;

    state
        .application_service
        .add_application(NewApplicationCommand {
            name: form.text("name"),
            svg: form.file("svg"),
        })
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::OK, application.into()))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let id = ApplicationId::from_string(&id)?;

    state
        .application_service
        .delete_application(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Software application deleted successfully!"),
            )
        })
}

pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ApplicationData>>, ApiError> {
    state
        .application_service
        .list_applications()
        .await
        .map_err(ApiError::from)
        .map(|applications| {
            ApiSuccess::new(StatusCode::OK, applications.iter().map(Into::into).collect())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationData {
    pub id: String,
    pub name: String,
    pub svg: AssetData,
    pub created_at: DateTime<Utc>,
}

impl From<&SoftwareApplication> for ApplicationData {
    fn from(application: &SoftwareApplication) -> Self {
        Self {
            id: application.id.to_string(),
            name: application.name.clone(),
            svg: (&application.svg).into(),
            created_at: application.created_at,
        }
    }
}
