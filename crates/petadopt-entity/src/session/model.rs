//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use petadopt_core::types::{SessionId, UserId};

/// A login session.
///
/// Sessions are created on login and terminated on logout or expiry.
/// Access tokens carry the session ID, so terminating the session
/// revokes every token issued for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    /// Client that logged in.
    pub user_agent: Option<String>,
    /// Why the session ended, e.g. `"User logout"`.
    pub terminated_reason: Option<String>,
    pub terminated_at: Option<DateTime<Utc>>,
    /// Login time.
    pub created_at: DateTime<Utc>,
    /// Hard cutoff; tokens for this session never outlive it.
    pub expires_at: DateTime<Utc>,
    /// Bumped on every authenticated request.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Live sessions authenticate requests; nothing else does.
    pub fn is_active(&self) -> bool {
        self.terminated_at.is_none() && self.expires_at > Utc::now()
    }

    /// Past `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Input for opening a session at login.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: UserId,
    pub user_agent: Option<String>,
    pub expires_at: DateTime<Utc>,
}
