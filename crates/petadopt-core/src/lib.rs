//! # petadopt-core
//!
//! Core crate for the PetAdopt service. Contains configuration schemas,
//! typed identifiers, sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PetAdopt crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
