//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use petadopt_core::result::AppResult;
use petadopt_core::types::SessionId;
use petadopt_entity::session::{CreateSession, Session};

use super::MemoryTables;
use crate::store::SessionStore;

/// Session store over [`MemoryTables`].
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    tables: Arc<MemoryTables>,
}

impl MemorySessionStore {
    /// Create a store over `tables`.
    pub fn new(tables: Arc<MemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            user_id: data.user_id,
            user_agent: data.user_agent.clone(),
            terminated_reason: None,
            terminated_at: None,
            created_at: now,
            expires_at: data.expires_at,
            last_activity: now,
        };
        self.tables.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>> {
        Ok(self.tables.sessions.get(&id).map(|s| s.value().clone()))
    }

    async fn touch(&self, id: SessionId) -> AppResult<()> {
        if let Some(mut session) = self.tables.sessions.get_mut(&id) {
            session.last_activity = Utc::now();
        }
        Ok(())
    }

    async fn terminate(&self, id: SessionId, reason: &str) -> AppResult<()> {
        if let Some(mut session) = self.tables.sessions.get_mut(&id) {
            if session.terminated_at.is_none() {
                session.terminated_at = Some(Utc::now());
                session.terminated_reason = Some(reason.to_string());
            }
        }
        Ok(())
    }
}
