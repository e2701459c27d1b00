use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::UserData;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::CredentialServicePort;
use crate::inbound::http::handlers::multipart::MultipartForm;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let command = UpdateProfileCommand {
        full_name: form.text("fullName"),
        email: form.text("email"),
        phone: form.text("phone"),
        about_me: form.text("aboutMe"),
        portfolio_url: form.text("portfolioURL"),
        github_url: form.text("githubURL"),
        instagram_url: form.text("instagramURL"),
        facebook_url: form.text("facebookURL"),
        twitter_url: form.text("twitterURL"),
        linkedin_url: form.text("linkedInURL"),
        avatar: form.file("avatar"),
        resume: form.file("resume"),
    };

    state
        .credential_service
        .update_profile(&current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
