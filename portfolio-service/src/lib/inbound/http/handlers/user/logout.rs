use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use crate::domain::user::ports::AuthenticationGatePort;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageData;
use crate::inbound::http::router::AppState;

/// Clears the client's cookie. The token itself stays valid until it expires.
///
/// Public: a stale or tampered cookie must still be overwritten, so a missing
/// or rejected session never fails the request.
pub async fn logout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(HeaderMap, ApiSuccess<MessageData>), ApiError> {
    let token = state.session_cookie.read(&request_headers).map(str::to_owned);
    let user = match token {
        Some(token) => state.gate.authenticate(Some(&token)).await.ok(),
        None => None,
    };

    state
        .credential_service
        .logout(user.as_ref().map(|u| &u.id))
        .await;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        state.session_cookie.expire().map_err(ApiError::internal)?,
    );

    Ok((
        headers,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Logged Out")),
    ))
}
