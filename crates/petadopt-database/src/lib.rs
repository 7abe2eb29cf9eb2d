//! # petadopt-database
//!
//! Record storage for PetAdopt. The [`store`] traits describe what the
//! service layer needs; [`repositories`] implements them over PostgreSQL
//! and [`memory`] implements them in-process. [`StoreManager`] picks one
//! according to `database.provider`.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::StoreManager;
pub use store::{PetStore, SessionStore, UserStore};
