//! Pet repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use petadopt_core::error::AppError;
use petadopt_core::result::AppResult;
use petadopt_core::types::PetId;
use petadopt_entity::pet::{NewPet, Pet, PetChanges, PetFilter};

use super::db_error;
use crate::store::PetStore;

/// Repository for pet records.
#[derive(Debug, Clone)]
pub struct PetRepository {
    pool: PgPool,
}

impl PetRepository {
    /// Create a new pet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the list query for `filter`.
fn build_list_query(filter: &PetFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM pets WHERE TRUE");

    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    for term in &filter.search_terms {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR pet_type::text ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR breed ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR status::text ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY ");
    for sort in filter.effective_ordering() {
        qb.push(sort.field.column())
            .push(" ")
            .push(sort.direction.as_sql())
            .push(", ");
    }
    qb.push("id ASC");
    qb
}

#[async_trait]
impl PetStore for PetRepository {
    async fn find_by_id(&self, id: PetId) -> AppResult<Option<Pet>> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find pet"))
    }

    async fn list(&self, filter: &PetFilter) -> AppResult<Vec<Pet>> {
        build_list_query(filter)
            .build_query_as::<Pet>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list pets"))
    }

    async fn create(&self, data: NewPet) -> AppResult<Pet> {
        let pet = Pet::from_new(data);
        sqlx::query_as::<_, Pet>(
            "INSERT INTO pets \
             (id, name, pet_type, breed, age, gender, size, description, status, owner_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING *",
        )
        .bind(pet.id)
        .bind(&pet.name)
        .bind(pet.pet_type)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(pet.gender)
        .bind(pet.size)
        .bind(&pet.description)
        .bind(pet.status)
        .bind(pet.owner_id)
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create pet"))
    }

    async fn update(&self, id: PetId, changes: &PetChanges) -> AppResult<Pet> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET \
             name = COALESCE($2, name), \
             pet_type = COALESCE($3, pet_type), \
             breed = COALESCE($4, breed), \
             age = COALESCE($5, age), \
             gender = COALESCE($6, gender), \
             size = COALESCE($7, size), \
             description = COALESCE($8, description), \
             status = COALESCE($9, status), \
             updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.pet_type)
        .bind(&changes.breed)
        .bind(changes.age)
        .bind(changes.gender)
        .bind(changes.size)
        .bind(&changes.description)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update pet"))?
        .ok_or_else(|| AppError::not_found(format!("Pet {id} not found")))
    }

    async fn delete(&self, id: PetId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete pet"))?;
        Ok(result.rows_affected() > 0)
    }
}
