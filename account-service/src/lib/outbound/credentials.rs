use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use auth::JwtError;
use auth::PasswordError;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialIssuer;

impl CredentialIssuer for Authenticator {
    fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        Authenticator::hash_password(self, password)
    }

    fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: UserId,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        Authenticator::authenticate(self, password, stored_hash, user_id)
    }

    fn issue_token(&self, user_id: UserId) -> Result<AuthenticationResult, JwtError> {
        Authenticator::issue_token(self, user_id)
    }
}
