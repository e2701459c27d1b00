//! Credential primitives library
//!
//! Provides the cryptographic building blocks of the portfolio service:
//! - Password hashing (Argon2id, fail-closed verification)
//! - Session tokens (stateless HS256 JWTs with a fixed lifetime)
//! - Password reset secrets (random secret + SHA-256 lookup token)
//!
//! The service crate composes these behind its own domain ports; nothing in
//! here touches storage or the network.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", Some(&hash)));
//! assert!(!hasher.verify("my_password", None));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionSettings, SessionTokenService};
//! use chrono::Duration;
//!
//! let sessions = SessionTokenService::new(SessionSettings::new(
//!     b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     Duration::days(7),
//! ));
//! let issued = sessions.issue("user123").unwrap();
//! assert_eq!(sessions.verify(&issued.token).unwrap(), "user123");
//! ```
//!
//! ## Reset Secrets
//! ```
//! use auth::ResetTokenCodec;
//!
//! let codec = ResetTokenCodec::default();
//! let grant = codec.generate().unwrap();
//! // Only `grant.lookup_token` is stored; the secret is mailed to the user.
//! assert_eq!(codec.derive_lookup_token(&grant.secret), grant.lookup_token);
//! ```

pub mod jwt;
pub mod password;
pub mod reset;
pub mod session;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::ResetGrant;
pub use reset::ResetTokenCodec;
pub use reset::ResetTokenError;
pub use session::IssuedSession;
pub use session::SessionError;
pub use session::SessionSettings;
pub use session::SessionTokenService;
