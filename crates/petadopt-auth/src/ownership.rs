//! Owner-or-read-only enforcement for pet records.

use petadopt_core::error::AppError;
use petadopt_core::types::UserId;
use petadopt_entity::permission::PetAction;
use petadopt_entity::pet::Pet;

/// Message returned with every ownership denial.
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// Grants safe actions to everyone and mutations to the pet's owner only.
///
/// A pet without an owner can be read but never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipPolicy;

impl OwnershipPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Whether `requester` may perform `action` on `pet`.
    pub fn has_object_permission(
        &self,
        action: PetAction,
        requester: Option<UserId>,
        pet: &Pet,
    ) -> bool {
        if action.is_safe() {
            return true;
        }
        match (requester, pet.owner_id) {
            (Some(requester), Some(owner)) => requester == owner,
            _ => false,
        }
    }

    /// Like [`has_object_permission`](Self::has_object_permission), but
    /// returns an authorization error on denial.
    pub fn require(
        &self,
        action: PetAction,
        requester: Option<UserId>,
        pet: &Pet,
    ) -> Result<(), AppError> {
        if self.has_object_permission(action, requester, pet) {
            Ok(())
        } else {
            Err(AppError::authorization(PERMISSION_DENIED))
        }
    }
}
