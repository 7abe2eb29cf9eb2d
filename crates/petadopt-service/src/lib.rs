//! # petadopt-service
//!
//! Business logic for PetAdopt. Services receive their stores and auth
//! helpers at construction time as `Arc`s and take the caller's
//! [`RequestContext`] explicitly on every operation that needs one.

pub mod context;
pub mod pet;
pub mod user;

pub use context::RequestContext;
pub use pet::{PetInput, PetService, PetView};
pub use user::{ProfileUpdate, Registration, UserService};
