//! Pet domain entities.

pub mod kind;
pub mod model;
pub mod query;

pub use kind::{Gender, PetSize, PetStatus, PetType};
pub use model::{NewPet, Pet, PetChanges};
pub use query::{PetFilter, PetSortField};
