//! Authentication utilities library
//!
//! Provides the credential primitives used by the account service:
//! - Password hashing (Argon2id)
//! - Session token signing and verification (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenConfig, TokenSigner};
//!
//! let signer = TokenSigner::new(TokenConfig::with_hours(
//!     "secret_key_at_least_32_bytes_long!",
//!     24,
//! ));
//! let (token, _claims) = signer.sign("user123").unwrap();
//! let decoded = signer.verify(&token).unwrap();
//! assert_eq!(decoded.user_id, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, HashingConfig, TokenConfig};
//!
//! let auth = Authenticator::from_config(
//!     TokenConfig::with_hours("secret_key_at_least_32_bytes_long!", 24),
//!     HashingConfig::default(),
//! )
//! .unwrap();
//!
//! // Sign-up: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Sign-in: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use jwt::TokenConfig;
pub use jwt::TokenSigner;
pub use password::HashingConfig;
pub use password::PasswordError;
pub use password::PasswordHasher;
