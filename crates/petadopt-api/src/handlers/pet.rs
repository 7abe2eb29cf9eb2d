//! Pet handlers.
//!
//! Each handler names its [`PetAction`]. For mutations, existence and ownership
//! are settled before the body is parsed, so a non-owner sending an
//! invalid body is refused with 403 rather than 400.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use petadopt_entity::permission::PetAction;
use petadopt_entity::pet::PetFilter;

use crate::dto::request::{PetListParams, PetPatchRequest, PetRequest};
use crate::dto::response::PetResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, MaybeAuthUser, PetPath, ValidatedJson, parse_body};
use crate::state::AppState;

fn filter_from(params: &PetListParams) -> PetFilter {
    PetFilter::from_params(params.search.as_deref(), params.ordering.as_deref())
}

fn render(views: Vec<petadopt_service::PetView>) -> Json<Vec<PetResponse>> {
    Json(views.into_iter().map(PetResponse::from).collect())
}

/// GET /api/pets
pub async fn list_pets(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Query(params): Query<PetListParams>,
) -> ApiResult<Json<Vec<PetResponse>>> {
    state.check_access(PetAction::List, caller.context())?;
    let views = state.pet_service.list(&filter_from(&params)).await?;
    Ok(render(views))
}

/// GET /api/pets/my_pets
pub async fn my_pets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PetListParams>,
) -> ApiResult<Json<Vec<PetResponse>>> {
    state.check_access(PetAction::MyPets, Some(auth.context()))?;
    let views = state
        .pet_service
        .my_pets(&auth, filter_from(&params))
        .await?;
    Ok(render(views))
}

/// GET /api/pets/available
pub async fn available_pets(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    Query(params): Query<PetListParams>,
) -> ApiResult<Json<Vec<PetResponse>>> {
    state.check_access(PetAction::Available, caller.context())?;
    let views = state.pet_service.available(filter_from(&params)).await?;
    Ok(render(views))
}

/// GET /api/pets/{id}
pub async fn get_pet(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    PetPath(id): PetPath,
) -> ApiResult<Json<PetResponse>> {
    state.check_access(PetAction::Retrieve, caller.context())?;
    let view = state.pet_service.get(id).await?;
    Ok(Json(view.into()))
}

/// POST /api/pets
pub async fn create_pet(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PetRequest>,
) -> ApiResult<(StatusCode, Json<PetResponse>)> {
    state.check_access(PetAction::Create, Some(auth.context()))?;
    let view = state.pet_service.create(&auth, req.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// PUT /api/pets/{id}
pub async fn update_pet(
    State(state): State<AppState>,
    auth: AuthUser,
    PetPath(id): PetPath,
    body: Bytes,
) -> ApiResult<Json<PetResponse>> {
    state
        .pet_service
        .authorize(&auth, id, PetAction::Update)
        .await?;
    let req: PetRequest = parse_body(&body)?;
    let view = state
        .pet_service
        .update(&auth, id, req.into_input()?)
        .await?;
    Ok(Json(view.into()))
}

/// PATCH /api/pets/{id}
pub async fn partial_update_pet(
    State(state): State<AppState>,
    auth: AuthUser,
    PetPath(id): PetPath,
    body: Bytes,
) -> ApiResult<Json<PetResponse>> {
    state
        .pet_service
        .authorize(&auth, id, PetAction::PartialUpdate)
        .await?;
    let req: PetPatchRequest = parse_body(&body)?;
    let view = state
        .pet_service
        .partial_update(&auth, id, req.into_changes()?)
        .await?;
    Ok(Json(view.into()))
}

/// DELETE /api/pets/{id}
pub async fn delete_pet(
    State(state): State<AppState>,
    auth: AuthUser,
    PetPath(id): PetPath,
) -> ApiResult<StatusCode> {
    state.pet_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
