//! Who is acting on a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use petadopt_core::types::{SessionId, UserId};

/// The authenticated caller of one request.
///
/// Built by the API's auth extractors from a verified token and handed
/// to every service call that needs an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    /// Session the token belongs to; logout ends this one.
    pub session_id: SessionId,
    pub username: String,
    pub user_agent: Option<String>,
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context stamped with the current time.
    pub fn new(
        user_id: UserId,
        session_id: SessionId,
        username: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            username,
            user_agent,
            request_time: Utc::now(),
        }
    }
}
