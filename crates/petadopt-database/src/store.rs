//! Store traits for pluggable persistence backends.

use async_trait::async_trait;

use petadopt_core::result::AppResult;
use petadopt_core::types::{PetId, SessionId, UserId};
use petadopt_entity::pet::{NewPet, Pet, PetChanges, PetFilter};
use petadopt_entity::session::{CreateSession, Session};
use petadopt_entity::user::{CreateUser, UpdateUser, User, UserSummary};

/// User account storage.
///
/// Usernames and emails are unique, compared case-insensitively.
/// Violations surface as `Conflict` errors.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch the public summaries of the given users. Unknown IDs are skipped.
    async fn find_summaries(&self, ids: &[UserId]) -> AppResult<Vec<UserSummary>>;

    /// Create a new user.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Update username and/or email.
    async fn update(&self, data: &UpdateUser) -> AppResult<User>;

    /// Stamp `last_login_at` with the current time.
    async fn record_login(&self, id: UserId) -> AppResult<()>;

    /// Delete a user together with their pets and sessions.
    async fn delete(&self, id: UserId) -> AppResult<bool>;
}

/// Pet record storage.
#[async_trait]
pub trait PetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a pet by primary key.
    async fn find_by_id(&self, id: PetId) -> AppResult<Option<Pet>>;

    /// List the pets matching `filter`, in the filter's order.
    async fn list(&self, filter: &PetFilter) -> AppResult<Vec<Pet>>;

    /// Insert a new pet.
    async fn create(&self, data: NewPet) -> AppResult<Pet>;

    /// Apply `changes` to an existing pet and bump `updated_at`.
    async fn update(&self, id: PetId, changes: &PetChanges) -> AppResult<Pet>;

    /// Delete a pet. Returns `true` if a record was removed.
    async fn delete(&self, id: PetId) -> AppResult<bool>;
}

/// Login session storage.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a new session.
    async fn create(&self, data: &CreateSession) -> AppResult<Session>;

    /// Find a session by ID.
    async fn find_by_id(&self, id: SessionId) -> AppResult<Option<Session>>;

    /// Update `last_activity` to the current time.
    async fn touch(&self, id: SessionId) -> AppResult<()>;

    /// Mark a session as terminated. Already-terminated sessions are left as is.
    async fn terminate(&self, id: SessionId, reason: &str) -> AppResult<()>;
}
