use std::sync::Arc;

use async_trait::async_trait;
use auth::SessionTokenService;

use crate::domain::user::models::PasswordField;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticationGatePort;
use crate::user::ports::UserRepository;

pub const LOGIN_REQUIRED: &str = "Please login to access this resource";
pub const SESSION_INVALID: &str = "Session is invalid or has expired, please login again";

/// Decides whether a request carries a valid session.
///
/// Each call either yields the authenticated user or rejects; nothing is
/// carried over between requests.
pub struct AuthenticationGate<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    sessions: Arc<SessionTokenService>,
}

impl<UR> AuthenticationGate<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, sessions: Arc<SessionTokenService>) -> Self {
        Self {
            repository,
            sessions,
        }
    }
}

#[async_trait]
impl<UR> AuthenticationGatePort for AuthenticationGate<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, token: Option<&str>) -> Result<User, UserError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| UserError::Unauthorized(LOGIN_REQUIRED.to_string()))?;

        let subject = self.sessions.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            UserError::Unauthorized(SESSION_INVALID.to_string())
        })?;

        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(error = %e, "Session token carries a malformed subject");
            UserError::Unauthorized(SESSION_INVALID.to_string())
        })?;

        self.repository
            .find_by_id(&user_id, PasswordField::Exclude)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Session token refers to a missing user");
                UserError::Unauthorized(SESSION_INVALID.to_string())
            })
    }
}
