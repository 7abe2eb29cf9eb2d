//! Session repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use petadopt_core::result::AppResult;
use petadopt_core::types::SessionId;
use petadopt_entity::session::{CreateSession, Session};

use super::db_error;
use crate::store::SessionStore;

/// Repository for login sessions.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, user_agent, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(SessionId::new())
        .bind(data.user_id)
        .bind(&data.user_agent)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create session"))
    }

    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find session"))
    }

    async fn touch(&self, id: SessionId) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_activity = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update session activity"))?;
        Ok(())
    }

    async fn terminate(&self, id: SessionId, reason: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE sessions SET terminated_at = NOW(), terminated_reason = $2 \
             WHERE id = $1 AND terminated_at IS NULL",
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to terminate session"))?;
        Ok(())
    }
}
