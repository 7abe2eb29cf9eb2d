//! In-process store backend.
//!
//! Tables live in [`DashMap`]s behind a shared [`MemoryTables`]. Each
//! mutation runs under a single shard lock; user writes are additionally
//! serialized so the uniqueness checks cannot race.

pub mod pet;
pub mod session;
pub mod user;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use petadopt_core::types::{PetId, SessionId, UserId};
use petadopt_entity::pet::Pet;
use petadopt_entity::session::Session;
use petadopt_entity::user::User;

pub use pet::MemoryPetStore;
pub use session::MemorySessionStore;
pub use user::MemoryUserStore;

/// The rows held by the memory backend.
#[derive(Debug, Default)]
pub struct MemoryTables {
    pub(crate) users: DashMap<UserId, User>,
    pub(crate) pets: DashMap<PetId, Pet>,
    pub(crate) sessions: DashMap<SessionId, Session>,
    pub(crate) user_writes: Mutex<()>,
}

impl MemoryTables {
    /// Create an empty set of tables.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}
