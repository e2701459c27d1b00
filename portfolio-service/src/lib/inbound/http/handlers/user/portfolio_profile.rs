use axum::extract::State;
use axum::http::StatusCode;

use super::UserData;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn portfolio_profile(
    State(state): State<AppState>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .credential_service
        .portfolio_profile()
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
