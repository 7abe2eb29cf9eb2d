//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use petadopt_core::types::{PetId, UserId};
use petadopt_entity::pet::{Gender, PetSize, PetStatus, PetType};
use petadopt_entity::user::{User, UserSummary};
use petadopt_service::PetView;

/// Public user fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
}

impl From<UserSummary> for UserResponse {
    fn from(s: UserSummary) -> Self {
        Self {
            id: s.id,
            username: s.username,
            email: s.email,
        }
    }
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// A pet as rendered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetResponse {
    /// Pet ID.
    pub id: PetId,
    /// Display name.
    pub name: String,
    /// Species.
    #[serde(rename = "type")]
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
    /// Adoption status.
    pub status: PetStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Owner summary, `null` for orphaned pets.
    pub owner: Option<UserResponse>,
}

impl From<PetView> for PetResponse {
    fn from(view: PetView) -> Self {
        let pet = view.pet;
        Self {
            id: pet.id,
            name: pet.name,
            pet_type: pet.pet_type,
            breed: pet.breed,
            age: pet.age,
            gender: pet.gender,
            size: pet.size,
            description: pet.description,
            status: pet.status,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
            owner: view.owner.map(UserResponse::from),
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token, also set as the session cookie.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The logged-in user.
    pub user: UserResponse,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human-readable message.
    pub detail: String,
}

impl DetailResponse {
    /// Creates a detail response.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Record store reachability.
    pub database: String,
}
