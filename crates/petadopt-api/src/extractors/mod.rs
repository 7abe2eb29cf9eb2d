//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AuthUser, LenientAuthUser, MaybeAuthUser};
pub use json::{ValidatedJson, parse_body};
pub use path::PetPath;
