use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserTransaction;
use crate::user::errors::UserError;

type UsersByEmail = HashMap<EmailAddress, User>;

/// Process-local user store.
///
/// Mirrors the Postgres adapter: writes are staged per transaction, applied
/// atomically on commit, and email uniqueness is checked against committed
/// rows both on insert and again on commit.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<UsersByEmail>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

pub struct InMemoryUserTransaction {
    users: Arc<RwLock<UsersByEmail>>,
    staged: Vec<User>,
}

impl InMemoryUserTransaction {
    fn staged_by_email(&self, email: &EmailAddress) -> Option<&User> {
        self.staged.iter().find(|user| &user.email == email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn begin(&self) -> Result<Box<dyn UserTransaction>, UserError> {
        Ok(Box::new(InMemoryUserTransaction {
            users: Arc::clone(&self.users),
            staged: Vec::new(),
        }))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.id == id)
            .cloned())
    }
}

#[async_trait]
impl UserTransaction for InMemoryUserTransaction {
    async fn find_by_email(&mut self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        if let Some(user) = self.staged_by_email(email) {
            return Ok(Some(user.clone()));
        }
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&mut self, user: User) -> Result<User, UserError> {
        if self.staged_by_email(&user.email).is_some()
            || self.users.read().await.contains_key(&user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        self.staged.push(user.clone());
        Ok(user)
    }

    async fn commit(self: Box<Self>) -> Result<(), UserError> {
        let InMemoryUserTransaction { users, staged } = *self;
        let mut users = users.write().await;

        // Another transaction may have committed the same email since insert.
        if let Some(conflict) = staged.iter().find(|user| users.contains_key(&user.email)) {
            return Err(UserError::EmailAlreadyExists(conflict.email.to_string()));
        }

        for user in staged {
            users.insert(user.email.clone(), user);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), UserError> {
        Ok(())
    }
}
