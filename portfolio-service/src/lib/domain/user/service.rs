use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::ResetTokenCodec;
use auth::SessionTokenService;
use chrono::Utc;

use crate::domain::asset::models::Asset;
use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::models::UploadedFile;
use crate::domain::asset::ports::AssetStore;
use crate::domain::errors::required;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ForgotPasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::PasswordField;
use crate::domain::user::models::PasswordReset;
use crate::domain::user::models::Profile;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::SessionGrant;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::models::MIN_PASSWORD_LENGTH;
use crate::user::errors::UserError;
use crate::user::ports::CredentialServicePort;
use crate::user::ports::NotificationSender;
use crate::user::ports::UserRepository;

pub const RESET_MAIL_SUBJECT: &str = "Personal Portfolio Dashboard Password Recovery";

const USER_NOT_FOUND: &str = "user not found!";

/// Credential primitives and settings the lifecycle service is built from.
pub struct CredentialSettings {
    pub hasher: Arc<PasswordHasher>,
    pub sessions: Arc<SessionTokenService>,
    pub reset_codec: ResetTokenCodec,
    /// Base URL of the dashboard; reset links point at `{dashboard_url}/password/reset/{secret}`
    pub dashboard_url: String,
    /// User whose profile the public portfolio shows
    pub portfolio_owner: Option<UserId>,
}

/// Domain service implementation for the credential lifecycle.
///
/// Concrete implementation of CredentialServicePort with dependency injection.
/// Every operation validates its inputs before touching storage, the asset
/// host or the mail provider.
pub struct CredentialService<UR, NS, AS>
where
    UR: UserRepository,
    NS: NotificationSender,
    AS: AssetStore,
{
    repository: Arc<UR>,
    notifier: Arc<NS>,
    assets: Arc<AS>,
    settings: CredentialSettings,
}

impl<UR, NS, AS> CredentialService<UR, NS, AS>
where
    UR: UserRepository,
    NS: NotificationSender,
    AS: AssetStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `notifier` - Out-of-band delivery of reset links
    /// * `assets` - Asset host for avatar and resume
    /// * `settings` - Hasher, session service, reset codec and links
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(
        repository: Arc<UR>,
        notifier: Arc<NS>,
        assets: Arc<AS>,
        settings: CredentialSettings,
    ) -> Self {
        Self {
            repository,
            notifier,
            assets,
            settings,
        }
    }

    fn open_session(&self, user: User) -> Result<SessionGrant, UserError> {
        let issued = self.settings.sessions.issue(&user.id.to_string())?;
        Ok(SessionGrant {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    fn reset_url(&self, secret: &str) -> String {
        format!(
            "{}/password/reset/{}",
            self.settings.dashboard_url.trim_end_matches('/'),
            secret
        )
    }

    async fn ensure_email_free(&self, email: &EmailAddress) -> Result<(), UserError> {
        match self
            .repository
            .find_by_email(email, PasswordField::Exclude)
            .await?
        {
            Some(_) => Err(UserError::EmailAlreadyExists(email.to_string())),
            None => Ok(()),
        }
    }

    /// Destroy the current asset, then upload its replacement.
    async fn replace_asset(
        &self,
        current: &Asset,
        file: UploadedFile,
        folder: AssetFolder,
    ) -> Result<Asset, UserError> {
        self.assets.destroy(&current.public_id).await?;
        Ok(self.assets.upload(file, folder).await?)
    }

    /// Best-effort removal of assets orphaned by a failed registration.
    async fn discard_assets(&self, assets: &[&Asset]) {
        for asset in assets {
            if let Err(e) = self.assets.destroy(&asset.public_id).await {
                tracing::error!(
                    public_id = %asset.public_id,
                    error = %e,
                    "Failed to discard orphaned asset"
                );
            }
        }
    }
}

fn check_password_length(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::Validation(format!(
            "Password must contain at least {} characters!",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Passwords are taken verbatim; only absence and emptiness count as missing.
fn required_password(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Blank optional links are stored as absent.
fn optional(value: Option<String>) -> Option<String> {
    required(value)
}

/// A submitted link replaces the current one, a blank submission clears it,
/// and an absent field leaves it untouched.
fn replace_link(submitted: Option<String>, current: Option<String>) -> Option<String> {
    match submitted {
        Some(value) => optional(Some(value)),
        None => current,
    }
}

#[async_trait]
impl<UR, NS, AS> CredentialServicePort for CredentialService<UR, NS, AS>
where
    UR: UserRepository,
    NS: NotificationSender,
    AS: AssetStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<SessionGrant, UserError> {
        let (avatar_file, resume_file) = match (command.avatar, command.resume) {
            (Some(avatar), Some(resume)) => (avatar, resume),
            _ => {
                return Err(UserError::Validation(
                    "Avatar and Resume are required.".to_string(),
                ))
            }
        };

        let fill_form = || UserError::Validation("Please Fill Full Form!".to_string());
        let full_name = required(command.full_name).ok_or_else(fill_form)?;
        let email = required(command.email).ok_or_else(fill_form)?;
        let phone = required(command.phone).ok_or_else(fill_form)?;
        let about_me = required(command.about_me).ok_or_else(fill_form)?;
        let password = required_password(command.password).ok_or_else(fill_form)?;
        let portfolio_url = required(command.portfolio_url).ok_or_else(fill_form)?;

        let email = EmailAddress::new(email)?;
        check_password_length(&password)?;
        self.ensure_email_free(&email).await?;

        let password_hash = self.settings.hasher.hash(&password)?;

        let avatar = self
            .assets
            .upload(avatar_file, AssetFolder::Avatars)
            .await?;
        let resume = match self.assets.upload(resume_file, AssetFolder::Resumes).await {
            Ok(resume) => resume,
            Err(e) => {
                self.discard_assets(&[&avatar]).await;
                return Err(e.into());
            }
        };

        let user = User {
            id: UserId::new(),
            email,
            profile: Profile {
                full_name,
                phone,
                about_me,
                portfolio_url,
                github_url: optional(command.github_url),
                instagram_url: optional(command.instagram_url),
                facebook_url: optional(command.facebook_url),
                twitter_url: optional(command.twitter_url),
                linkedin_url: optional(command.linkedin_url),
            },
            avatar,
            resume,
            password_hash: Some(password_hash),
            reset: None,
            created_at: Utc::now(),
        };

        let mut created = match self.repository.create(user.clone()).await {
            Ok(created) => created,
            Err(e) => {
                self.discard_assets(&[&user.avatar, &user.resume]).await;
                return Err(e);
            }
        };
        created.password_hash = None;

        tracing::info!(user_id = %created.id, "User registered");

        self.open_session(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<SessionGrant, UserError> {
        let (email, password) = match (required(command.email), required_password(command.password))
        {
            (Some(email), Some(password)) => (email, password),
            _ => {
                return Err(UserError::Validation(
                    "Email And Password Are Required!".to_string(),
                ))
            }
        };

        // A malformed address cannot belong to anyone; it fails like an unknown one.
        let user = match EmailAddress::new(email) {
            Ok(email) => {
                self.repository
                    .find_by_email(&email, PasswordField::Include)
                    .await?
            }
            Err(_) => None,
        };

        // Always run a verification so both failure causes cost the same.
        let stored_hash = user.as_ref().and_then(|u| u.password_hash.as_deref());
        let verified = self.settings.hasher.verify(&password, stored_hash);

        match user {
            Some(mut user) if verified => {
                user.password_hash = None;
                tracing::info!(user_id = %user.id, "User logged in");
                self.open_session(user)
            }
            _ => {
                tracing::warn!("Login rejected");
                Err(UserError::InvalidCredentials)
            }
        }
    }

    async fn logout(&self, user_id: Option<&UserId>) {
        // No revocation store: the client drops the cookie, the token itself
        // stays valid until it expires.
        match user_id {
            Some(user_id) => tracing::info!(user_id = %user_id, "User logged out"),
            None => tracing::info!("Anonymous logout, clearing cookie"),
        }
    }

    async fn get_me(&self, user_id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(user_id, PasswordField::Exclude)
            .await?
            .ok_or_else(|| UserError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let user = self.get_me(user_id).await?;

        let email = match required(command.email) {
            Some(email) => {
                let email = EmailAddress::new(email)?;
                if email != user.email {
                    self.ensure_email_free(&email).await?;
                    Some(email)
                } else {
                    None
                }
            }
            None => None,
        };

        let current = user.profile.clone();
        let profile = Profile {
            full_name: required(command.full_name).unwrap_or(current.full_name),
            phone: required(command.phone).unwrap_or(current.phone),
            about_me: required(command.about_me).unwrap_or(current.about_me),
            portfolio_url: required(command.portfolio_url).unwrap_or(current.portfolio_url),
            github_url: replace_link(command.github_url, current.github_url),
            instagram_url: replace_link(command.instagram_url, current.instagram_url),
            facebook_url: replace_link(command.facebook_url, current.facebook_url),
            twitter_url: replace_link(command.twitter_url, current.twitter_url),
            linkedin_url: replace_link(command.linkedin_url, current.linkedin_url),
        };

        let avatar = match command.avatar {
            Some(file) => Some(
                self.replace_asset(&user.avatar, file, AssetFolder::Avatars)
                    .await?,
            ),
            None => None,
        };
        let resume = match command.resume {
            Some(file) => Some(
                self.replace_asset(&user.resume, file, AssetFolder::Resumes)
                    .await?,
            ),
            None => None,
        };

        let patch = UserPatch {
            email,
            profile: Some(profile),
            avatar,
            resume,
            ..UserPatch::default()
        };

        let updated = self.repository.update(user_id, patch).await?;
        tracing::info!(user_id = %user_id, "Profile updated");

        Ok(updated)
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        command: UpdatePasswordCommand,
    ) -> Result<(), UserError> {
        let (current, new, confirm) = match (
            required_password(command.current_password),
            required_password(command.new_password),
            required_password(command.confirm_new_password),
        ) {
            (Some(current), Some(new), Some(confirm)) => (current, new, confirm),
            _ => return Err(UserError::Validation("Please Fill All Fields!".to_string())),
        };

        let user = self
            .repository
            .find_by_id(user_id, PasswordField::Include)
            .await?
            .ok_or_else(|| UserError::NotFound(USER_NOT_FOUND.to_string()))?;

        if !self
            .settings
            .hasher
            .verify(&current, user.password_hash.as_deref())
        {
            tracing::warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(UserError::IncorrectCurrentPassword);
        }

        if new != confirm {
            return Err(UserError::PasswordMismatch(
                "New Password And Confirm New Password Do Not Match".to_string(),
            ));
        }
        check_password_length(&new)?;

        let password_hash = self.settings.hasher.hash(&new)?;
        self.repository
            .update(user_id, UserPatch::replace_password(password_hash))
            .await?;

        tracing::info!(user_id = %user_id, "Password updated");

        Ok(())
    }

    async fn forgot_password(
        &self,
        command: ForgotPasswordCommand,
    ) -> Result<EmailAddress, UserError> {
        let email = required(command.email)
            .ok_or_else(|| UserError::Validation("Please Provide Your Email!".to_string()))?;
        let email = EmailAddress::new(email)?;

        let user = self
            .repository
            .find_by_email(&email, PasswordField::Exclude)
            .await?
            .ok_or_else(|| UserError::NotFound(USER_NOT_FOUND.to_string()))?;

        let grant = self.settings.reset_codec.generate()?;
        let reset_url = self.reset_url(&grant.secret);

        self.repository
            .update(
                &user.id,
                UserPatch::begin_reset(PasswordReset {
                    lookup_token: grant.lookup_token,
                    expires_at: grant.expires_at,
                }),
            )
            .await?;

        let body = format!(
            "Your Reset Password Token Is:- \n\n {} \n\n If you have not requested this, please ignore it.",
            reset_url
        );

        if let Err(delivery_error) = self
            .notifier
            .send(&user.email, RESET_MAIL_SUBJECT, &body)
            .await
        {
            tracing::error!(
                user_id = %user.id,
                error = %delivery_error,
                "Reset mail delivery failed, clearing pending reset"
            );
            if let Err(e) = self
                .repository
                .update(&user.id, UserPatch::clear_reset())
                .await
            {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Failed to clear pending reset after delivery failure"
                );
            }
            return Err(delivery_error.into());
        }

        tracing::info!(user_id = %user.id, "Reset mail sent");

        Ok(user.email)
    }

    async fn reset_password(
        &self,
        command: ResetPasswordCommand,
    ) -> Result<SessionGrant, UserError> {
        let (password, confirm) = match (
            required_password(command.password),
            required_password(command.confirm_password),
        ) {
            (Some(password), Some(confirm)) => (password, confirm),
            _ => return Err(UserError::Validation("Please Fill All Fields!".to_string())),
        };

        let now = Utc::now();
        let lookup_token = self.settings.reset_codec.derive_lookup_token(&command.secret);

        let user = self
            .repository
            .find_by_reset_lookup_token(&lookup_token, now)
            .await?
            .filter(|u| u.reset.as_ref().is_some_and(|r| r.is_live_at(now)))
            .ok_or_else(|| {
                tracing::warn!("Reset rejected: no live reset matches");
                UserError::InvalidOrExpiredToken
            })?;

        if password != confirm {
            return Err(UserError::PasswordMismatch(
                "Password And Confirm Password do not match!".to_string(),
            ));
        }
        check_password_length(&password)?;

        let password_hash = self.settings.hasher.hash(&password)?;
        let updated = self
            .repository
            .update(&user.id, UserPatch::replace_password(password_hash))
            .await?;

        tracing::info!(user_id = %updated.id, "Password reset completed");

        self.open_session(updated)
    }

    async fn portfolio_profile(&self) -> Result<User, UserError> {
        let owner = self
            .settings
            .portfolio_owner
            .ok_or_else(|| UserError::NotFound(USER_NOT_FOUND.to_string()))?;

        self.get_me(&owner).await
    }
}
