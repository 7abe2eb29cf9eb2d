//! In-memory pet store.

use std::sync::Arc;

use async_trait::async_trait;

use petadopt_core::error::AppError;
use petadopt_core::result::AppResult;
use petadopt_core::types::PetId;
use petadopt_entity::pet::{NewPet, Pet, PetChanges, PetFilter};

use super::MemoryTables;
use crate::store::PetStore;

/// Pet store over [`MemoryTables`].
#[derive(Debug, Clone)]
pub struct MemoryPetStore {
    tables: Arc<MemoryTables>,
}

impl MemoryPetStore {
    /// Create a store over `tables`.
    pub fn new(tables: Arc<MemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl PetStore for MemoryPetStore {
    async fn find_by_id(&self, id: PetId) -> AppResult<Option<Pet>> {
        Ok(self.tables.pets.get(&id).map(|p| p.value().clone()))
    }

    async fn list(&self, filter: &PetFilter) -> AppResult<Vec<Pet>> {
        let mut pets: Vec<Pet> = self
            .tables
            .pets
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        filter.sort(&mut pets);
        Ok(pets)
    }

    async fn create(&self, data: NewPet) -> AppResult<Pet> {
        let pet = Pet::from_new(data);
        self.tables.pets.insert(pet.id, pet.clone());
        Ok(pet)
    }

    async fn update(&self, id: PetId, changes: &PetChanges) -> AppResult<Pet> {
        let mut entry = self
            .tables
            .pets
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Pet {id} not found")))?;
        changes.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: PetId) -> AppResult<bool> {
        Ok(self.tables.pets.remove(&id).is_some())
    }
}
