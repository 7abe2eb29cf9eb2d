//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use petadopt_auth::jwt::{JwtDecoder, JwtEncoder};
use petadopt_auth::password::{PasswordHasher, PasswordValidator};
use petadopt_auth::session::SessionManager;
use petadopt_core::config::AppConfig;
use petadopt_core::error::AppError;
use petadopt_database::StoreManager;
use petadopt_entity::permission::PetAction;
use petadopt_service::{PetService, RequestContext, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // -- Configuration --
    /// Application configuration
    pub config: Arc<AppConfig>,

    // -- Infrastructure --
    /// Record stores (PostgreSQL or in-memory)
    pub stores: StoreManager,

    // -- Auth --
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,

    // -- Services --
    /// Pet service
    pub pet_service: Arc<PetService>,
    /// Registration and profile service
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: StoreManager) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));

        let session_manager = Arc::new(SessionManager::new(
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
            stores.sessions(),
            stores.users(),
            Arc::clone(&hasher),
            config.session.clone(),
        ));

        let pet_service = Arc::new(PetService::new(stores.pets(), stores.users()));
        let user_service = Arc::new(UserService::new(stores.users(), hasher, validator));

        Self {
            config: Arc::new(config),
            stores,
            session_manager,
            pet_service,
            user_service,
        }
    }

    /// Reject an anonymous caller for `action`.
    ///
    /// Actions that need an identity always require one. Safe actions
    /// require one only when `api.require_auth_for_reads` is set.
    pub fn check_access(
        &self,
        action: PetAction,
        viewer: Option<&RequestContext>,
    ) -> Result<(), AppError> {
        let needs_identity = action.requires_identity()
            || (action.is_safe() && self.config.api.require_auth_for_reads);
        if needs_identity && viewer.is_none() {
            return Err(AppError::authentication(
                "Authentication credentials were not provided.",
            ));
        }
        Ok(())
    }
}
