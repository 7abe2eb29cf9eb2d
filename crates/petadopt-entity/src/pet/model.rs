//! Pet entity model.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use petadopt_core::types::{PetId, UserId};

use super::kind::{Gender, PetSize, PetStatus, PetType};

/// A pet listed for adoption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Pet {
    /// Unique pet identifier.
    pub id: PetId,
    /// Display name.
    pub name: String,
    /// Species.
    #[serde(rename = "type")]
    pub pet_type: PetType,
    /// Breed, possibly blank.
    pub breed: String,
    /// Age in years.
    pub age: i32,
    /// Gender.
    pub gender: Gender,
    /// Size class.
    pub size: PetSize,
    /// Free-form description.
    pub description: String,
    /// Adoption status.
    pub status: PetStatus,
    /// Owning user. `None` once the pet is orphaned; nobody may modify it then.
    pub owner_id: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Whether `user_id` owns this pet.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Build a fresh record from `new` with system-managed fields filled in.
    pub fn from_new(new: NewPet) -> Self {
        let now = Utc::now();
        Self {
            id: PetId::new(),
            name: new.name,
            pet_type: new.pet_type,
            breed: new.breed,
            age: new.age,
            gender: new.gender,
            size: new.size,
            description: new.description,
            status: new.status,
            owner_id: Some(new.owner_id),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPet {
    /// Display name.
    pub name: String,
    /// Species.
    pub pet_type: PetType,
    /// Breed.
    pub breed: String,
    /// Age in years.
    pub age: i32,
    /// Gender.
    pub gender: Gender,
    /// Size class.
    pub size: PetSize,
    /// Description.
    pub description: String,
    /// Initial status.
    pub status: PetStatus,
    /// The creating user.
    pub owner_id: UserId,
}

/// A set of field changes applied by PUT and PATCH.
///
/// `None` leaves the field unchanged. Ownership and timestamps are not
/// writable through this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetChanges {
    /// New name.
    pub name: Option<String>,
    /// New species.
    pub pet_type: Option<PetType>,
    /// New breed.
    pub breed: Option<String>,
    /// New age.
    pub age: Option<i32>,
    /// New gender.
    pub gender: Option<Gender>,
    /// New size.
    pub size: Option<PetSize>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<PetStatus>,
}

impl PetChanges {
    /// Apply the changes to `pet` and move `updated_at` strictly forward.
    pub fn apply(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(pet_type) = self.pet_type {
            pet.pet_type = pet_type;
        }
        if let Some(breed) = &self.breed {
            pet.breed = breed.clone();
        }
        if let Some(age) = self.age {
            pet.age = age;
        }
        if let Some(gender) = self.gender {
            pet.gender = gender;
        }
        if let Some(size) = self.size {
            pet.size = size;
        }
        if let Some(description) = &self.description {
            pet.description = description.clone();
        }
        if let Some(status) = self.status {
            pet.status = status;
        }
        pet.updated_at = Utc::now().max(pet.updated_at + TimeDelta::microseconds(1));
    }
}
