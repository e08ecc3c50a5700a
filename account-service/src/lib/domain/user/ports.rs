use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::JwtError;
use auth::PasswordError;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Session;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for account operations exposed to inbound adapters.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user and issue a session token.
    ///
    /// The existence check, the insert and the token signing run inside a
    /// single transaction; nothing is persisted unless all of them succeed.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` / `Token` - Password hashing or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<Session, UserError>;

    /// Acknowledge a sign-out.
    ///
    /// Tokens are stateless, so no server-side state changes.
    async fn sign_out(&self, user_id: &UserId) -> Result<(), UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Email uniqueness is enforced by the store itself.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Open a transactional scope.
    ///
    /// # Errors
    /// * `DatabaseError` - Transaction could not be started
    async fn begin(&self) -> Result<Box<dyn UserTransaction>, UserError>;

    /// Retrieve user by email address outside any transaction.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}

/// Unit of work against the user store.
///
/// Changes become visible to other readers only after [`commit`]. Dropping
/// the handle without committing discards them.
///
/// [`commit`]: UserTransaction::commit
#[async_trait]
pub trait UserTransaction: Send {
    /// Retrieve user by email address, seeing this transaction's own writes.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&mut self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Insert a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique constraint on email rejected the row
    /// * `DatabaseError` - Database operation failed
    async fn insert(&mut self, user: User) -> Result<User, UserError>;

    /// Make all writes durable and release the scope.
    ///
    /// # Errors
    /// * `DatabaseError` - Commit failed; nothing was applied
    async fn commit(self: Box<Self>) -> Result<(), UserError>;

    /// Discard all writes and release the scope.
    ///
    /// # Errors
    /// * `DatabaseError` - Rollback could not be confirmed
    async fn rollback(self: Box<Self>) -> Result<(), UserError>;
}

/// Password hashing and session token issuance.
///
/// Implementations are CPU-bound and synchronous; callers run them on the
/// blocking pool.
pub trait CredentialIssuer: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing failed
    fn hash_password(&self, password: &str) -> Result<String, PasswordError>;

    /// Verify `password` against `stored_hash` and issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` / `JwtError` - Verification or signing failed
    fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: UserId,
    ) -> Result<AuthenticationResult, AuthenticationError>;

    /// Issue a token for `user_id` without a password check.
    ///
    /// # Errors
    /// * `JwtError` - Signing failed
    fn issue_token(&self, user_id: UserId) -> Result<AuthenticationResult, JwtError>;
}
