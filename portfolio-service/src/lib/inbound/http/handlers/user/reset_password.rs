use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::session_response;
use super::SessionData;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Completes a reset and signs the user in with a fresh session.
pub async fn reset_password(
    State(state): State<AppState>,
    Path(secret): Path<String>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<(HeaderMap, ApiSuccess<SessionData>), ApiError> {
    let grant = state
        .credential_service
        .reset_password(ResetPasswordCommand {
            secret,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await
        .map_err(ApiError::from)?;

    session_response(&state, &grant, StatusCode::OK, "Password Reset Successfully!")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequestBody {
    password: Option<String>,
    confirm_password: Option<String>,
}
