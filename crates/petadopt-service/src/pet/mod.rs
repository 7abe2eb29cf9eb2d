//! Pet record use cases.

pub mod service;

pub use service::{PetInput, PetService, PetView};
