use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::ResetTokenError;

/// Random bytes per reset secret (256 bits of entropy).
pub const SECRET_BYTES: usize = 32;

const DEFAULT_LIFETIME_MINUTES: i64 = 15;

/// A one-time reset secret and the lookup token derived from it.
///
/// `secret` goes to the user out-of-band and is never stored;
/// `lookup_token` and `expires_at` are what gets persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetGrant {
    pub secret: String,
    pub lookup_token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for ResetGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetGrant")
            .field("secret", &"<redacted>")
            .field("lookup_token", &self.lookup_token)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Generates password reset secrets and derives their lookup tokens.
///
/// The lookup token is a plain SHA-256 digest: the secret is single-use,
/// high-entropy and short-lived, so a slow hash buys nothing here.
#[derive(Debug, Clone, Copy)]
pub struct ResetTokenCodec {
    lifetime: Duration,
}

impl ResetTokenCodec {
    /// Create a codec whose grants expire `lifetime` after issuance.
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Generate a fresh grant expiring one lifetime from now.
    ///
    /// # Returns
    /// Grant holding the raw secret, its lookup token and absolute expiry
    ///
    /// # Errors
    /// * `EntropyUnavailable` - OS random source failed
    /// * `ExpiryOutOfRange` - Expiry overflowed the timestamp range
    pub fn generate(&self) -> Result<ResetGrant, ResetTokenError> {
        self.generate_at(Utc::now())
    }

    /// Generate a fresh grant as of `issued_at`.
    pub fn generate_at(&self, issued_at: DateTime<Utc>) -> Result<ResetGrant, ResetTokenError> {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| ResetTokenError::EntropyUnavailable(e.to_string()))?;

        let secret = hex::encode(bytes);
        let lookup_token = self.derive_lookup_token(&secret);
        let expires_at = issued_at
            .checked_add_signed(self.lifetime)
            .ok_or(ResetTokenError::ExpiryOutOfRange)?;

        Ok(ResetGrant {
            secret,
            lookup_token,
            expires_at,
        })
    }

    /// Derive the persisted lookup token from a presented secret.
    ///
    /// Deterministic: the same secret always yields the same token.
    pub fn derive_lookup_token(&self, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for ResetTokenCodec {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_LIFETIME_MINUTES))
    }
}
