use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::config::TokenConfig;
use super::errors::JwtError;

/// Issues and verifies session tokens.
///
/// Tokens are HS256 JWTs carrying [`SessionClaims`]. Every token expires
/// after the lifetime configured in [`TokenConfig`]; verification rejects
/// tokens without an `exp` claim.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiration: Duration,
}

impl TokenSigner {
    /// Create a signer from an explicit configuration.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration or a secret store, never from code
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: Algorithm::HS256,
            expiration: config.expiration(),
        }
    }

    /// Sign a fresh token for `user_id`.
    ///
    /// # Returns
    /// Encoded token and the claims it carries
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration overflows or token encoding failed
    pub fn sign(&self, user_id: impl ToString) -> Result<(String, SessionClaims), JwtError> {
        let claims = SessionClaims::for_user(user_id, self.expiration)?;
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Encode explicit claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature or algorithm does not match
    /// * `MissingClaim` - A required claim is absent
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidToken(e.to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}
