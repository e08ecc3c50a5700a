use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::JwtError;
use chrono::Utc;

use crate::domain::user::models::Password;
use crate::domain::user::models::Session;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::CredentialIssuer;
use crate::user::ports::UserRepository;
use crate::user::ports::UserTransaction;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<UR, CI>
where
    UR: UserRepository,
    CI: CredentialIssuer,
{
    repository: Arc<UR>,
    credentials: Arc<CI>,
}

impl<UR, CI> AccountService<UR, CI>
where
    UR: UserRepository,
    CI: CredentialIssuer,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `credentials` - Password hasher and token signer
    pub fn new(repository: Arc<UR>, credentials: Arc<CI>) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    /// Steps of sign-up that run inside the transaction.
    async fn register(
        &self,
        transaction: &mut dyn UserTransaction,
        command: SignUpCommand,
    ) -> Result<Session, UserError> {
        if transaction.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = transaction
            .insert(User {
                id: UserId::new(),
                name: command.name,
                email: command.email,
                password_hash,
                created_at: now,
                updated_at: now,
            })
            .await?;

        let issued = self.credentials.issue_token(user.id)?;

        into_session(issued, user)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let credentials = Arc::clone(&self.credentials);
        let hash =
            tokio::task::spawn_blocking(move || credentials.hash_password(password.expose()))
                .await??;
        Ok(hash)
    }
}

fn into_session(issued: AuthenticationResult, user: User) -> Result<Session, UserError> {
    let expires_at = issued.claims.expires_at().ok_or_else(|| {
        UserError::Token(JwtError::EncodingFailed(format!(
            "expiration {} is out of range",
            issued.claims.exp
        )))
    })?;

    Ok(Session {
        token: issued.access_token,
        expires_at,
        user,
    })
}

#[async_trait]
impl<UR, CI> AccountServicePort for AccountService<UR, CI>
where
    UR: UserRepository,
    CI: CredentialIssuer,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, UserError> {
        let mut transaction = self.repository.begin().await?;

        match self.register(transaction.as_mut(), command).await {
            Ok(session) => {
                transaction.commit().await?;
                tracing::info!(user_id = %session.user.id, "User signed up");
                Ok(session)
            }
            Err(e) => {
                if let Err(rollback_error) = transaction.rollback().await {
                    tracing::warn!(
                        error = %rollback_error,
                        "Failed to roll back sign-up transaction"
                    );
                }
                tracing::debug!(error = %e, "Sign-up aborted");
                Err(e)
            }
        }
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<Session, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        let credentials = Arc::clone(&self.credentials);
        let password = command.password;
        let stored_hash = user.password_hash.clone();
        let user_id = user.id;
        let issued = tokio::task::spawn_blocking(move || {
            credentials.authenticate(&password, &stored_hash, user_id)
        })
        .await?
        .map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Sign-in rejected");
            UserError::from(e)
        })?;

        tracing::info!(user_id = %user.id, "User signed in");

        into_session(issued, user)
    }

    async fn sign_out(&self, user_id: &UserId) -> Result<(), UserError> {
        tracing::info!(user_id = %user_id, "User signed out");
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
