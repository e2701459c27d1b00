use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::asset::models::Asset;
use crate::domain::asset::models::UploadedFile;
use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// User aggregate entity.
///
/// The registered principal: the portfolio owner who signs in to the dashboard.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub profile: Profile,
    pub avatar: Asset,
    pub resume: Asset,
    /// Only populated when the repository was asked for `PasswordField::Include`.
    pub password_hash: Option<String>,
    pub reset: Option<PasswordReset>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and normalised to lowercase, so
/// uniqueness in storage is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated, lowercased EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public profile attributes shown on the portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub phone: String,
    pub about_me: String,
    pub portfolio_url: String,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
}

/// A pending password reset.
///
/// The lookup token and its expiry only exist together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub lookup_token: String,
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Whether a lookup should load the stored password hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordField {
    Include,
    Exclude,
}

/// Partial update of a user, persisted as one write.
///
/// `reset: Some(None)` clears a pending reset; `reset: None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<EmailAddress>,
    pub profile: Option<Profile>,
    pub avatar: Option<Asset>,
    pub resume: Option<Asset>,
    pub password_hash: Option<String>,
    pub reset: Option<Option<PasswordReset>>,
}

impl UserPatch {
    /// Start a pending reset.
    pub fn begin_reset(reset: PasswordReset) -> Self {
        Self {
            reset: Some(Some(reset)),
            ..Self::default()
        }
    }

    /// Drop any pending reset.
    pub fn clear_reset() -> Self {
        Self {
            reset: Some(None),
            ..Self::default()
        }
    }

    /// Store a new password hash and drop any pending reset.
    pub fn replace_password(password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            reset: Some(None),
            ..Self::default()
        }
    }

    /// Apply the patch to an in-memory user.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(profile) = self.profile {
            user.profile = profile;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = avatar;
        }
        if let Some(resume) = self.resume {
            user.resume = resume;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = Some(password_hash);
        }
        if let Some(reset) = self.reset {
            user.reset = reset;
        }
    }
}

/// Command to register the portfolio owner.
///
/// Inputs arrive raw; the service validates them before any side effect.
#[derive(Debug, Default)]
pub struct RegisterCommand {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    pub password: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

#[derive(Debug, Default)]
pub struct LoginCommand {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Command to update the profile with optional fields.
///
/// Only provided fields are changed; uploaded files replace the stored asset.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub avatar: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

#[derive(Debug, Default)]
pub struct UpdatePasswordCommand {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

#[derive(Debug, Default)]
pub struct ForgotPasswordCommand {
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct ResetPasswordCommand {
    /// Raw secret taken from the reset URL
    pub secret: String,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
