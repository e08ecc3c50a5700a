use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Session token payload.
///
/// Serialised as `{ "userId": ..., "iat": ..., "exp": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the authenticated user
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `user_id` issued now and valid for `lifetime`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration is not representable
    pub fn for_user(user_id: impl ToString, lifetime: Duration) -> Result<Self, JwtError> {
        Self::issued_at(user_id, Utc::now(), lifetime)
    }

    /// Claims issued at an explicit instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration is not representable
    pub fn issued_at(
        user_id: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token lifetime {} overflows", lifetime))
        })?;

        Ok(Self {
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Expiration as a timestamp, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
