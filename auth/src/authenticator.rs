use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::jwt::TokenConfig;
use crate::jwt::TokenSigner;
use crate::password::HashingConfig;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Claims embedded in `access_token`
    pub claims: SessionClaims,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator from its two collaborators.
    pub fn new(password_hasher: PasswordHasher, token_signer: TokenSigner) -> Self {
        Self {
            password_hasher,
            token_signer,
        }
    }

    /// Build hasher and signer from configuration.
    ///
    /// # Errors
    /// * `PasswordError::InvalidParameters` - Hashing costs are invalid
    pub fn from_config(token: TokenConfig, hashing: HashingConfig) -> Result<Self, PasswordError> {
        Ok(Self::new(
            PasswordHasher::with_config(hashing)?,
            TokenSigner::new(token),
        ))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier embedded in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(user_id)?)
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after sign-up, when the caller has just proven the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, user_id: impl ToString) -> Result<AuthenticationResult, JwtError> {
        let (access_token, claims) = self.token_signer.sign(user_id)?;
        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.token_signer.verify(token)
    }
}
