use std::fmt;

use chrono::Duration;

/// Signing secret and token lifetime.
///
/// Passed to [`TokenSigner::new`](super::TokenSigner::new) at construction;
/// there is no process-wide signing state.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    expiration: Duration,
}

impl TokenConfig {
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes for HS256
    /// * `expiration` - Lifetime of every issued token
    pub fn new(secret: impl Into<Vec<u8>>, expiration: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiration,
        }
    }

    /// Convenience constructor for a lifetime expressed in hours.
    pub fn with_hours(secret: impl Into<Vec<u8>>, expiration_hours: i64) -> Self {
        Self::new(secret, Duration::hours(expiration_hours))
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::with_hours("super-secret-signing-key-0123456789", 24);
        let rendered = format!("{:?}", config);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_with_hours() {
        let config = TokenConfig::with_hours("k", 2);
        assert_eq!(config.expiration(), Duration::hours(2));
        assert_eq!(config.secret(), b"k");
    }
}
