use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::ForgotPasswordCommand;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequestBody>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    state
        .credential_service
        .forgot_password(ForgotPasswordCommand { email: body.email })
        .await
        .map_err(ApiError::from)
        .map(|email| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new(format!("Email Sent To {} Successfully!", email)),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequestBody {
    email: Option<String>,
}
