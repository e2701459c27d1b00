use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ForgotPasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::PasswordField;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::ResetPasswordCommand;
use crate::domain::user::models::SessionGrant;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::user::errors::DeliveryError;
use crate::user::errors::UserError;

/// Port for credential lifecycle operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register the portfolio owner and sign them in.
    ///
    /// # Arguments
    /// * `command` - Raw profile fields, password, avatar and resume
    ///
    /// # Returns
    /// Created user with a fresh session token
    ///
    /// # Errors
    /// * `Validation` - A required field or file is missing, or the password is too short
    /// * `InvalidEmail` - Email is malformed
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Asset` - Upload to the asset host failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<SessionGrant, UserError>;

    /// Exchange an email and password for a session token.
    ///
    /// # Errors
    /// * `Validation` - Email or password missing
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<SessionGrant, UserError>;

    /// Record a client-side logout.
    ///
    /// Session tokens are stateless; the token stays valid until it expires.
    /// `user_id` is `None` when the caller presented no usable session.
    async fn logout(&self, user_id: Option<&UserId>);

    /// Retrieve the signed-in user.
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn get_me(&self, user_id: &UserId) -> Result<User, UserError>;

    /// Update profile fields, email and assets.
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `InvalidEmail` - New email is malformed
    /// * `EmailAlreadyExists` - New email belongs to someone else
    /// * `Asset` - Replacing an asset failed
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        user_id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Change the password of the signed-in user.
    ///
    /// # Errors
    /// * `Validation` - A field is missing or the new password is too short
    /// * `IncorrectCurrentPassword` - Current password does not verify
    /// * `PasswordMismatch` - New password and confirmation differ
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        user_id: &UserId,
        command: UpdatePasswordCommand,
    ) -> Result<(), UserError>;

    /// Start a password reset and mail the reset link.
    ///
    /// # Returns
    /// Address the link was sent to
    ///
    /// # Errors
    /// * `Validation` - Email missing
    /// * `NotFound` - No user with this email
    /// * `Delivery` - Mail could not be sent; the pending reset was cleared
    /// * `DatabaseError` - Database operation failed
    async fn forgot_password(
        &self,
        command: ForgotPasswordCommand,
    ) -> Result<EmailAddress, UserError>;

    /// Complete a password reset and sign the user in.
    ///
    /// # Errors
    /// * `Validation` - Password or confirmation missing, or password too short
    /// * `InvalidOrExpiredToken` - No pending reset matches the secret
    /// * `PasswordMismatch` - Password and confirmation differ
    /// * `DatabaseError` - Database operation failed
    async fn reset_password(
        &self,
        command: ResetPasswordCommand,
    ) -> Result<SessionGrant, UserError>;

    /// Retrieve the public profile of the configured portfolio owner.
    ///
    /// # Errors
    /// * `NotFound` - No owner configured or owner does not exist
    /// * `DatabaseError` - Database operation failed
    async fn portfolio_profile(&self) -> Result<User, UserError>;
}

/// Port for resolving the identity behind a presented session token.
#[async_trait]
pub trait AuthenticationGatePort: Send + Sync + 'static {
    /// Authenticate a request.
    ///
    /// # Arguments
    /// * `token` - Session token taken from the cookie or header, if any
    ///
    /// # Returns
    /// Authenticated user, without password hash
    ///
    /// # Errors
    /// * `Unauthorized` - Token missing, invalid, expired, or its user is gone
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: Option<&str>) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create, with its password hash
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    /// * `password` - Whether to load the password hash
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(
        &self,
        id: &UserId,
        password: PasswordField,
    ) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Normalised email address
    /// * `password` - Whether to load the password hash
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        password: PasswordField,
    ) -> Result<Option<User>, UserError>;

    /// Retrieve the user with a live pending reset matching a lookup token.
    ///
    /// # Arguments
    /// * `lookup_token` - Token derived from the presented reset secret
    /// * `now` - Resets expiring at or before this instant do not match
    ///
    /// # Returns
    /// Optional user entity (None if no live reset matches)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_reset_lookup_token(
        &self,
        lookup_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError>;

    /// Apply a partial update in a single write.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `patch` - Fields to change
    ///
    /// # Returns
    /// Updated user entity, without password hash
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError>;
}

/// Out-of-band delivery of messages to a user.
#[async_trait]
pub trait NotificationSender: Send + Sync + 'static {
    /// Send a plain-text message.
    ///
    /// # Arguments
    /// * `to` - Destination address
    /// * `subject` - Message subject
    /// * `body` - Plain-text body
    ///
    /// # Errors
    /// * `Rejected` - Provider refused the message
    /// * `Transport` - Provider could not be reached
    async fn send(&self, to: &EmailAddress, subject: &str, body: &str)
        -> Result<(), DeliveryError>;
}
