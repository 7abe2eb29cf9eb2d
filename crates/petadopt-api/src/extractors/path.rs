//! Typed path parameter extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use petadopt_core::error::AppError;
use petadopt_core::types::PetId;

use crate::error::ApiError;

/// The `{id}` segment of `/pets/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct PetPath(pub PetId);

impl<S: Send + Sync> FromRequestParts<S> for PetPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        parse_pet_id(&raw).map(PetPath).map_err(ApiError::from)
    }
}

/// Parse a pet ID from a path segment.
pub fn parse_pet_id(raw: &str) -> Result<PetId, AppError> {
    raw.parse()
        .map_err(|_| AppError::field("id", format!("\"{raw}\" is not a valid UUID.")))
}
