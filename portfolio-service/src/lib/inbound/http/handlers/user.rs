use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::AssetData;
use crate::domain::user::models::SessionGrant;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub mod forgot_password;
pub mod get_me;
pub mod login;
pub mod logout;
pub mod portfolio_profile;
pub mod register;
pub mod reset_password;
pub mod update_password;
pub mod update_profile;

/// Public view of a user; never carries the password hash or reset state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub about_me: String,
    pub portfolio_url: String,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar: AssetData,
    pub resume: AssetData,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            full_name: user.profile.full_name.clone(),
            phone: user.profile.phone.clone(),
            about_me: user.profile.about_me.clone(),
            portfolio_url: user.profile.portfolio_url.clone(),
            github_url: user.profile.github_url.clone(),
            instagram_url: user.profile.instagram_url.clone(),
            facebook_url: user.profile.facebook_url.clone(),
            twitter_url: user.profile.twitter_url.clone(),
            linkedin_url: user.profile.linkedin_url.clone(),
            avatar: (&user.avatar).into(),
            resume: (&user.resume).into(),
            created_at: user.created_at,
        }
    }
}

/// Body of every response that opens a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub message: String,
    pub user: UserData,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Hand the token out through both carriers: the cookie and the body.
fn session_response(
    state: &AppState,
    grant: &SessionGrant,
    status: StatusCode,
    message: &str,
) -> Result<(HeaderMap, ApiSuccess<SessionData>), ApiError> {
    let cookie = state
        .session_cookie
        .issue(&grant.token, grant.expires_at)
        .map_err(ApiError::internal)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);

    Ok((
        headers,
        ApiSuccess::new(
            status,
            SessionData {
                message: message.to_string(),
                user: (&grant.user).into(),
                token: grant.token.clone(),
                expires_at: grant.expires_at,
            },
        ),
    ))
}
