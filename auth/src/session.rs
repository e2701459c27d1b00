use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Startup configuration for session tokens.
#[derive(Clone)]
pub struct SessionSettings {
    /// HMAC signing secret, process-wide
    pub secret: Vec<u8>,
    /// Fixed token lifetime from issuance
    pub lifetime: Duration,
}

impl SessionSettings {
    pub fn new(secret: impl Into<Vec<u8>>, lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            lifetime,
        }
    }
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Session token errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to issue session token: {0}")]
    Issue(String),

    #[error("Session token signature is invalid")]
    InvalidSignature,

    #[error("Session token has expired")]
    Expired,

    #[error("Session token is malformed: {0}")]
    Malformed(String),
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => SessionError::Issue(msg),
            JwtError::DecodingFailed(msg) => SessionError::Malformed(msg),
            JwtError::InvalidSignature => SessionError::InvalidSignature,
            JwtError::TokenExpired => SessionError::Expired,
        }
    }
}

/// Issues and verifies stateless, signed session tokens.
///
/// There is no server-side session table: a token is valid while its
/// signature checks out and its expiry lies in the future. Nothing here
/// can revoke a token before it expires.
pub struct SessionTokenService {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

impl SessionTokenService {
    /// Create a session token service.
    ///
    /// # Arguments
    /// * `settings` - Signing secret and token lifetime
    ///
    /// # Returns
    /// Configured SessionTokenService instance
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            jwt_handler: JwtHandler::new(&settings.secret),
            lifetime: settings.lifetime,
        }
    }

    /// Lifetime applied to every issued token.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for a subject, valid from now.
    ///
    /// # Arguments
    /// * `subject` - User identifier to embed
    ///
    /// # Returns
    /// Signed token and its absolute expiry
    ///
    /// # Errors
    /// * `Issue` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<IssuedSession, SessionError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for a subject as of `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionError> {
        let claims = Claims::for_subject(subject, issued_at, self.lifetime);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| SessionError::Issue("expiry out of range".to_string()))?;

        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Verify a presented token and return its subject.
    ///
    /// Signature first, expiry second; claims of a token that fails the
    /// signature check are never inspected.
    ///
    /// # Arguments
    /// * `token` - Presented session token
    ///
    /// # Returns
    /// Subject identifier embedded at issuance
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was tampered with or signed by another key
    /// * `Expired` - Token is past its expiry
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    pub fn verify(&self, token: &str) -> Result<String, SessionError> {
        let claims: Claims = self.jwt_handler.decode(token)?;
        Ok(claims.sub)
    }
}
