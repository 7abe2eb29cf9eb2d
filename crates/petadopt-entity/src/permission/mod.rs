//! Permission domain entities.

pub mod action;

pub use action::PetAction;
