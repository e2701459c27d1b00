use axum::extract::Multipart;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::session_response;
use super::SessionData;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::multipart::MultipartForm;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(HeaderMap, ApiSuccess<SessionData>), ApiError> {
    let command = register_command(MultipartForm::read(multipart).await?);

    let grant = state
        .credential_service
        .register(command)
        .await
        .map_err(ApiError::from)?;

    session_response(&state, &grant, StatusCode::CREATED, "User Registered!")
}

/// Form field names are the ones the dashboard client sends.
fn register_command(mut form: MultipartForm) -> RegisterCommand {
    RegisterCommand {
        full_name: form.text("fullName"),
        email: form.text("email"),
        phone: form.text("phone"),
        about_me: form.text("aboutMe"),
        password: form.text("password"),
        portfolio_url: form.text("portfolioURL"),
        github_url: form.text("githubURL"),
        instagram_url: form.text("instagramURL"),
        facebook_url: form.text("facebookURL"),
        twitter_url: form.text("twitterURL"),
        linkedin_url: form.text("linkedInURL"),
        avatar: form.file("avatar"),
        resume: form.file("resume"),
    }
}
