use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<UpdatePasswordRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .credential_service
        .update_password(
            &current.user_id,
            UpdatePasswordCommand {
                current_password: body.current_password,
                new_password: body.new_password,
                confirm_new_password: body.confirm_new_password,
            },
        )
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Password Updated!")))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequestBody {
    current_password: Option<String>,
    new_password: Option<String>,
    confirm_new_password: Option<String>,
}
