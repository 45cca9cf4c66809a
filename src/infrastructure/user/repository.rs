//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Users plus the email lookup index, behind a single lock so they can never
/// be observed out of sync and no lock-ordering issues can arise.
#[derive(Debug, Default)]
struct Store {
    users: HashMap<Uuid, User>,
    /// Index for normalized email -> user ID lookup
    email_index: HashMap<String, Uuid>,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(id.as_uuid()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .email_index
            .get(email)
            .and_then(|user_id| store.users.get(user_id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.email_index.contains_key(user.email()) {
            return Err(DomainError::DuplicateEmail);
        }

        store
            .email_index
            .insert(user.email().to_string(), *user.id().as_uuid());
        store.users.insert(*user.id().as_uuid(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        let old_user = store.users.get(user.id().as_uuid()).ok_or_else(|| {
            DomainError::not_found(format!("User '{}' not found", user.id()))
        })?;

        // If the email changed, check uniqueness and update the index
        if old_user.email() != user.email() {
            if store.email_index.contains_key(user.email()) {
                return Err(DomainError::DuplicateEmail);
            }

            let old_email = old_user.email().to_string();
            store.email_index.remove(&old_email);
            store
                .email_index
                .insert(user.email().to_string(), *user.id().as_uuid());
        }

        store.users.insert(*user.id().as_uuid(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        if let Some(user) = store.users.remove(id.as_uuid()) {
            store.email_index.remove(user.email());
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
