//! Pet listing, lookup and owner-restricted mutation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use petadopt_auth::OwnershipPolicy;
use petadopt_core::error::AppError;
use petadopt_core::result::AppResult;
use petadopt_core::types::{PetId, UserId};
use petadopt_database::store::{PetStore, UserStore};
use petadopt_entity::permission::PetAction;
use petadopt_entity::pet::{Gender, NewPet, Pet, PetChanges, PetFilter, PetSize, PetStatus, PetType};
use petadopt_entity::user::UserSummary;

use crate::context::RequestContext;

/// A pet together with its owner's public summary.
#[derive(Debug, Clone, PartialEq)]
pub struct PetView {
    /// The pet record.
    pub pet: Pet,
    /// The owner, if the pet has one.
    pub owner: Option<UserSummary>,
}

/// A complete set of writable pet fields, as accepted by create and PUT.
///
/// `breed` and `status` may be left out: create falls back to `""` and
/// `AVAILABLE`, PUT keeps the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct PetInput {
    /// Display name.
    pub name: String,
    /// Species.
    pub pet_type: PetType,
    /// Breed.
    pub breed: Option<String>,
    /// Age in years.
    pub age: i32,
    /// Gender.
    pub gender: Gender,
    /// Size class.
    pub size: PetSize,
    /// Description.
    pub description: String,
    /// Adoption status.
    pub status: Option<PetStatus>,
}

impl PetInput {
    fn into_changes(self) -> PetChanges {
        PetChanges {
            name: Some(self.name),
            pet_type: Some(self.pet_type),
            breed: self.breed,
            age: Some(self.age),
            gender: Some(self.gender),
            size: Some(self.size),
            description: Some(self.description),
            status: self.status,
        }
    }
}

/// Pet use cases.
#[derive(Debug, Clone)]
pub struct PetService {
    pets: Arc<dyn PetStore>,
    users: Arc<dyn UserStore>,
    policy: OwnershipPolicy,
}

impl PetService {
    /// Creates a new pet service.
    pub fn new(pets: Arc<dyn PetStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            pets,
            users,
            policy: OwnershipPolicy::new(),
        }
    }

    /// All pets matching `filter`.
    pub async fn list(&self, filter: &PetFilter) -> AppResult<Vec<PetView>> {
        let pets = self.pets.list(filter).await?;
        self.with_owners(pets).await
    }

    /// The caller's own pets.
    pub async fn my_pets(&self, ctx: &RequestContext, filter: PetFilter) -> AppResult<Vec<PetView>> {
        self.list(&filter.owned_by(ctx.user_id)).await
    }

    /// Pets open for adoption, including the caller's own.
    pub async fn available(&self, filter: PetFilter) -> AppResult<Vec<PetView>> {
        self.list(&filter.with_status(PetStatus::Available)).await
    }

    /// A single pet.
    pub async fn get(&self, id: PetId) -> AppResult<PetView> {
        let pet = self.find(id).await?;
        self.with_owner(pet).await
    }

    /// Create a pet owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, input: PetInput) -> AppResult<PetView> {
        let pet = self
            .pets
            .create(NewPet {
                name: input.name,
                pet_type: input.pet_type,
                breed: input.breed.unwrap_or_default(),
                age: input.age,
                gender: input.gender,
                size: input.size,
                description: input.description,
                status: input.status.unwrap_or_default(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(pet_id = %pet.id, owner_id = %ctx.user_id, "Pet created");
        self.with_owner(pet).await
    }

    /// Load a pet and check that the caller may perform `action` on it.
    ///
    /// Fails with not-found before authorization, so callers can run this
    /// ahead of body validation.
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        id: PetId,
        action: PetAction,
    ) -> AppResult<Pet> {
        let pet = self.find(id).await?;
        self.policy.require(action, Some(ctx.user_id), &pet)?;
        Ok(pet)
    }

    /// Replace the writable fields of a pet (PUT).
    pub async fn update(&self, ctx: &RequestContext, id: PetId, input: PetInput) -> AppResult<PetView> {
        self.apply(ctx, id, PetAction::Update, input.into_changes())
            .await
    }

    /// Change only the supplied fields of a pet (PATCH).
    pub async fn partial_update(
        &self,
        ctx: &RequestContext,
        id: PetId,
        changes: PetChanges,
    ) -> AppResult<PetView> {
        self.apply(ctx, id, PetAction::PartialUpdate, changes).await
    }

    /// Delete a pet.
    pub async fn delete(&self, ctx: &RequestContext, id: PetId) -> AppResult<()> {
        self.authorize(ctx, id, PetAction::Destroy).await?;
        if !self.pets.delete(id).await? {
            return Err(not_found());
        }
        info!(pet_id = %id, user_id = %ctx.user_id, "Pet deleted");
        Ok(())
    }

    async fn apply(
        &self,
        ctx: &RequestContext,
        id: PetId,
        action: PetAction,
        changes: PetChanges,
    ) -> AppResult<PetView> {
        self.authorize(ctx, id, action).await?;
        let pet = self.pets.update(id, &changes).await?;
        info!(pet_id = %id, user_id = %ctx.user_id, action = %action, "Pet updated");
        self.with_owner(pet).await
    }

    async fn find(&self, id: PetId) -> AppResult<Pet> {
        self.pets.find_by_id(id).await?.ok_or_else(not_found)
    }

    async fn with_owner(&self, pet: Pet) -> AppResult<PetView> {
        let mut views = self.with_owners(vec![pet]).await?;
        views.pop().ok_or_else(|| AppError::internal("Owner lookup lost a record"))
    }

    async fn with_owners(&self, pets: Vec<Pet>) -> AppResult<Vec<PetView>> {
        let mut ids: Vec<UserId> = pets.iter().filter_map(|p| p.owner_id).collect();
        ids.sort();
        ids.dedup();

        let owners: HashMap<UserId, UserSummary> = self
            .users
            .find_summaries(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(pets
            .into_iter()
            .map(|pet| {
                let owner = pet.owner_id.and_then(|id| owners.get(&id).cloned());
                PetView { pet, owner }
            })
            .collect())
    }
}

fn not_found() -> AppError {
    AppError::not_found("No Pet matches the given query.")
}
