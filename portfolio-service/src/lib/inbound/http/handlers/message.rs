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
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageId;
use crate::domain::message::models::SendMessageCommand;
use crate::domain::message::ports::MessageServicePort;
use crate::inbound::http::router::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequestBody>,
) -> Result<ApiSuccess<ContactMessageData>, ApiError> {
    state
        .message_service
        .send_message(SendMessageCommand {
            sender_name: body.sender_name,
            subject: body.subject,
            message: body.message,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref message| ApiSuccess::new(StatusCode::OK, message.into()))
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ContactMessageData>>, ApiError> {
    state
        .message_service
        .list_messages()
        .await
        .map_err(ApiError::from)
        .map(|messages| ApiSuccess::new(StatusCode::OK, messages.iter().map(Into::into).collect()))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let id = MessageId::from_string(&id)?;

    state
        .message_service
        .delete_message(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Message Deleted!")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequestBody {
    sender_name: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

/// A visitor's contact message, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessageData {
    pub id: String,
    pub sender_name: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for ContactMessageData {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender_name: message.sender_name.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            created_at: message.created_at,
        }
    }
}
