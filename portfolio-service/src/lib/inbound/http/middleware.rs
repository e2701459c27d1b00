use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub user: User,
}

/// Middleware that resolves the session token and adds the user to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = state.session_cookie.read(req.headers()).map(str::to_owned);

    let user = state
        .gate
        .authenticate(token.as_deref())
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        user,
    });

    Ok(next.run(req).await)
}
