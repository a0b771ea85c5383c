//! Authentication and authorization library
//!
//! Provides the request authorization chain used by the service:
//! - Password hashing (Argon2id)
//! - Access token issuance and validation (JWT, shared HMAC secret)
//! - Token resolution against a caller-supplied user lookup
//! - Composable gates over the resolved principal (active, moderator)
//!
//! The service owns its user storage and adapts it through [`UserLookup`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenConfig, TokenService};
//! use chrono::Utc;
//!
//! let tokens = TokenService::new(&TokenConfig::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let now = Utc::now();
//! let token = tokens.issue("42", now).unwrap();
//! assert_eq!(tokens.decode(&token, now).unwrap().sub, "42");
//! ```
//!
//! ## Gates
//! ```
//! use auth::{require_active, require_moderator, Denial, Principal};
//!
//! let principal = Principal { id: 42, is_active: false, is_moderator: true };
//! assert_eq!(require_active(principal.clone()), Err(Denial::UserInactive));
//! assert!(require_moderator(principal).is_ok());
//! ```

pub mod authenticator;
pub mod config;
pub mod decision;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod resolver;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use config::HashingConfig;
pub use config::TokenConfig;
pub use decision::AuthDecision;
pub use decision::Denial;
pub use decision::Principal;
pub use gate::require_active;
pub use gate::require_moderator;
pub use gate::Access;
pub use jwt::DecodeError;
pub use jwt::JwtError;
pub use jwt::TokenPayload;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resolver::AuthResolver;
pub use resolver::UserLookup;
