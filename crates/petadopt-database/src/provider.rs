//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use petadopt_core::config::{DatabaseConfig, DatabaseProvider};
use petadopt_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryPetStore, MemorySessionStore, MemoryTables, MemoryUserStore};
use crate::repositories::{PetRepository, SessionRepository, UserRepository};
use crate::store::{PetStore, SessionStore, UserStore};

/// The three record stores, backed by whichever provider is configured.
#[derive(Debug, Clone)]
pub struct StoreManager {
    users: Arc<dyn UserStore>,
    pets: Arc<dyn PetStore>,
    sessions: Arc<dyn SessionStore>,
    pool: Option<DatabasePool>,
}

impl StoreManager {
    /// Build the stores selected by `config.provider`.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL record store");
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory record store");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            pets: Arc::new(PetRepository::new(pg.clone())),
            sessions: Arc::new(SessionRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        let tables = MemoryTables::new();
        Self {
            users: Arc::new(MemoryUserStore::new(tables.clone())),
            pets: Arc::new(MemoryPetStore::new(tables.clone())),
            sessions: Arc::new(MemorySessionStore::new(tables)),
            pool: None,
        }
    }

    /// Assemble a manager from individual stores, with no pool to manage.
    pub fn from_stores(
        users: Arc<dyn UserStore>,
        pets: Arc<dyn PetStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            users,
            pets,
            sessions,
            pool: None,
        }
    }

    /// The user store.
    pub fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }

    /// The pet store.
    pub fn pets(&self) -> Arc<dyn PetStore> {
        Arc::clone(&self.pets)
    }

    /// The session store.
    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.sessions)
    }

    /// Name of the active backend.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Whether the backend can serve queries.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
