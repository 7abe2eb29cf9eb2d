//! Session lifecycle manager: login, logout and per-request validation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use petadopt_core::config::SessionConfig;
use petadopt_core::error::{AppError, NON_FIELD_ERRORS};
use petadopt_core::result::AppResult;
use petadopt_core::types::SessionId;
use petadopt_database::store::{SessionStore, UserStore};
use petadopt_entity::session::{CreateSession, Session};
use petadopt_entity::user::User;

use crate::jwt::{IssuedToken, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The access token bound to `session`.
    pub token: IssuedToken,
    /// The created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// A verified caller: the token checked out and its session is live.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The caller's account.
    pub user: User,
    /// The session the token was issued for.
    pub session: Session,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    password_hasher: Arc<PasswordHasher>,
    session_config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            sessions,
            users,
            password_hasher,
            session_config,
        }
    }

    /// Verify credentials, open a session and issue its access token.
    ///
    /// Unknown usernames and wrong passwords fail identically with a
    /// `non_field_errors` validation error.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<&str>,
    ) -> AppResult<LoginResult> {
        let Some(mut user) = self.users.find_by_username(username).await? else {
            warn!(username = %username, "Login attempt for unknown user");
            return Err(AppError::field(NON_FIELD_ERRORS, INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::field(NON_FIELD_ERRORS, INVALID_CREDENTIALS));
        }

        let session = self
            .sessions
            .create(&CreateSession {
                user_id: user.id,
                user_agent: user_agent.map(str::to_string),
                expires_at: Utc::now()
                    + Duration::hours(self.session_config.absolute_timeout_hours as i64),
            })
            .await?;

        let token =
            self.jwt_encoder
                .issue(user.id, session.id, &user.username, session.expires_at)?;

        self.users.record_login(user.id).await?;
        user.last_login_at = Some(session.created_at);

        info!(user_id = %user.id, session_id = %session.id, "Login successful");
        Ok(LoginResult {
            token,
            session,
            user,
        })
    }

    /// Terminate a session. Terminating an already-closed session is a no-op.
    pub async fn logout(&self, session_id: SessionId) -> AppResult<()> {
        self.sessions.terminate(session_id, "User logout").await?;
        info!(session_id = %session_id, "Logout");
        Ok(())
    }

    /// Resolve a bearer token to a live session and its user.
    pub async fn authenticate(&self, token: &str) -> AppResult<Authenticated> {
        let claims = self.jwt_decoder.decode(token)?;
        let session = self.validate_session(claims.session_id()).await?;

        if session.user_id != claims.user_id() {
            return Err(AppError::authentication("Invalid token"));
        }

        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        self.sessions.touch(session.id).await?;
        Ok(Authenticated { user, session })
    }

    /// Load a session and check that it is neither terminated nor expired.
    pub async fn validate_session(&self, session_id: SessionId) -> AppResult<Session> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::authentication("Session not found"))?;

        if session.terminated_at.is_some() {
            return Err(AppError::authentication("Session has been terminated"));
        }
        if session.is_expired() {
            return Err(AppError::authentication("Session has expired"));
        }
        Ok(session)
    }
}
