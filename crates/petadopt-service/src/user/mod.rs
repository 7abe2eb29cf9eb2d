//! User account use cases.

pub mod service;

pub use service::{ProfileUpdate, Registration, UserService};
