//! # petadopt-auth
//!
//! Authentication and authorization for PetAdopt.
//!
//! ## Modules
//!
//! - `jwt` - access token signing and verification
//! - `password` - Argon2id hashing and password policy
//! - `session` - login, logout and per-request session validation
//! - `ownership` - owner-or-read-only checks on pet records

pub mod jwt;
pub mod ownership;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use ownership::OwnershipPolicy;
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{Authenticated, LoginResult, SessionManager};
