//! In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use petadopt_core::error::AppError;
use petadopt_core::result::AppResult;
use petadopt_core::types::UserId;
use petadopt_entity::user::{CreateUser, UpdateUser, User, UserSummary};

use super::MemoryTables;
use crate::store::UserStore;

/// User store over [`MemoryTables`].
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    tables: Arc<MemoryTables>,
}

impl MemoryUserStore {
    /// Create a store over `tables`.
    pub fn new(tables: Arc<MemoryTables>) -> Self {
        Self { tables }
    }

    fn find_by<P: Fn(&User) -> bool>(&self, predicate: P) -> Option<User> {
        self.tables
            .users
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    fn ensure_unique(&self, id: UserId, username: Option<&str>, email: Option<&str>) -> AppResult<()> {
        if let Some(username) = username {
            let username = username.to_lowercase();
            if self
                .find_by(|u| u.id != id && u.username.to_lowercase() == username)
                .is_some()
            {
                return Err(AppError::conflict("A user with that username already exists."));
            }
        }
        if let Some(email) = email {
            let email = email.to_lowercase();
            if self
                .find_by(|u| u.id != id && u.email.to_lowercase() == email)
                .is_some()
            {
                return Err(AppError::conflict("A user with that email already exists."));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_lowercase();
        Ok(self.find_by(|u| u.username.to_lowercase() == username))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self.find_by(|u| u.email.to_lowercase() == email))
    }

    async fn find_summaries(&self, ids: &[UserId]) -> AppResult<Vec<UserSummary>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.tables.users.get(id).map(|u| u.summary()))
            .collect())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let _guard = self.tables.user_writes.lock().await;
        let id = UserId::new();
        self.ensure_unique(id, Some(&data.username), Some(&data.email))?;

        let now = Utc::now();
        let user = User {
            id,
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        self.tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        let _guard = self.tables.user_writes.lock().await;
        self.ensure_unique(data.id, data.username.as_deref(), data.email.as_deref())?;

        let mut entry = self
            .tables
            .users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;
        let user = entry.value_mut();
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn record_login(&self, id: UserId) -> AppResult<()> {
        if let Some(mut user) = self.tables.users.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let _guard = self.tables.user_writes.lock().await;
        if self.tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        self.tables.pets.retain(|_, pet| pet.owner_id != Some(id));
        self.tables.sessions.retain(|_, session| session.user_id != id);
        Ok(true)
    }
}
