use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct Store {
    /// Registration order, used for listing
    users: Vec<User>,
    /// email -> password hash
    credentials: HashMap<String, String>,
}

/// Process-local user and credential store.
///
/// Uniqueness check and insert happen under a single write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let store = self.store.read().await;

        Ok(store
            .users
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let store = self.store.read().await;

        Ok(store.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn get_password_hash(&self, email: &str) -> Result<Option<String>, UserError> {
        let store = self.store.read().await;

        Ok(store.credentials.get(email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if store.credentials.contains_key(new_user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                new_user.email.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId::new(),
            email: new_user.email,
            name: new_user.name,
            role: new_user.role,
            subscription: new_user.subscription,
            created_at: Utc::now(),
            total_usage: 0,
        };

        store
            .credentials
            .insert(user.email.as_str().to_string(), new_user.password_hash);
        store.users.push(user.clone());

        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let store = self.store.read().await;

        Ok(store.users.clone())
    }
}
