//! Account registration and self-service profile management.

use std::sync::Arc;

use tracing::info;

use petadopt_auth::password::{PasswordHasher, PasswordValidator};
use petadopt_core::error::{AppError, FieldErrors};
use petadopt_core::result::AppResult;
use petadopt_core::types::UserId;
use petadopt_database::store::UserStore;
use petadopt_entity::user::{CreateUser, UpdateUser, User};

use crate::context::RequestContext;

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const EMAIL_TAKEN: &str = "A user with that email already exists.";
const PASSWORD_MISMATCH: &str = "Password fields didn't match.";

/// Registration input. Format rules are checked by the caller; this
/// service checks uniqueness and the password policy.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Confirmation, compared to `password` when present.
    pub password2: Option<String>,
}

/// Profile changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Handles registration and profile operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Register a new account.
    ///
    /// All failures are collected and returned together as field errors.
    pub async fn register(&self, req: Registration) -> AppResult<User> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_string();

        let mut errors = self.uniqueness_errors(None, Some(&username), Some(&email)).await?;

        if let Some(password2) = &req.password2 {
            if *password2 != req.password {
                push(&mut errors, "password2", PASSWORD_MISMATCH);
            }
        }
        for problem in self.validator.violations(&req.password, &username) {
            push(&mut errors, "password", problem);
        }

        if !errors.is_empty() {
            return Err(AppError::validation_fields(errors));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// The caller's account.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))
    }

    /// Update the caller's username and/or email.
    pub async fn update_profile(&self, ctx: &RequestContext, req: ProfileUpdate) -> AppResult<User> {
        let username = req.username.map(|u| u.trim().to_string());
        let email = req.email.map(|e| e.trim().to_string());

        let errors = self
            .uniqueness_errors(Some(ctx.user_id), username.as_deref(), email.as_deref())
            .await?;
        if !errors.is_empty() {
            return Err(AppError::validation_fields(errors));
        }

        let user = self
            .users
            .update(&UpdateUser {
                id: ctx.user_id,
                username,
                email,
            })
            .await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    async fn uniqueness_errors(
        &self,
        current: Option<UserId>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(username) = username {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if Some(existing.id) != current {
                    push(&mut errors, "username", USERNAME_TAKEN);
                }
            }
        }
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if Some(existing.id) != current {
                    push(&mut errors, "email", EMAIL_TAKEN);
                }
            }
        }
        Ok(errors)
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}
