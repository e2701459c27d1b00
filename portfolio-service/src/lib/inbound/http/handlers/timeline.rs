use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::timeline::models::NewTimelineCommand;
use crate::domain::timeline::models::TimelineEntry;
use crate::domain::timeline::models::TimelineId;
use crate::domain::timeline::ports::TimelineServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_entry(
    State(state): State<AppState>,
    Json(body): Json<AddTimelineRequestBody>,
) -> Result<ApiSuccess<TimelineData>, ApiError> {
    state
        .timeline_service
        .add_entry(NewTimelineCommand {
            title: body.title,
            description: body.description,
            from: body.from,
            to: body.to,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref entry| ApiSuccess::new(StatusCode::OK, entry.into()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let id = TimelineId::from_string(&id)?;

    state
        .timeline_service
        .delete_entry(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Timeline Deleted!")))
}

pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TimelineData>>, ApiError> {
    state
        .timeline_service
        .list_entries()
        .await
        .map_err(ApiError::from)
        .map(|entries| ApiSuccess::new(StatusCode::OK, entries.iter().map(Into::into).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTimelineRequestBody {
    title: Option<String>,
    description: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub from: String,
    pub to: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TimelineEntry> for TimelineData {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            from: entry.from.clone(),
            to: entry.to.clone(),
            created_at: entry.created_at,
        }
    }
}
