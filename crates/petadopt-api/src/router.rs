//! Route definitions for the PetAdopt HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging and the body size limit.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(pet_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, login, logout and the current user's profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/user",
            get(handlers::auth::get_profile)
                .put(handlers::auth::replace_profile)
                .patch(handlers::auth::update_profile),
        )
}

/// Pet collection, filtered lists and per-record operations.
///
/// The static `my_pets` and `available` segments take precedence over `{id}`.
fn pet_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pets",
            get(handlers::pet::list_pets).post(handlers::pet::create_pet),
        )
        .route("/pets/my_pets", get(handlers::pet::my_pets))
        .route("/pets/available", get(handlers::pet::available_pets))
        .route(
            "/pets/{id}",
            get(handlers::pet::get_pet)
                .put(handlers::pet::update_pet)
                .patch(handlers::pet::partial_update_pet)
                .delete(handlers::pet::delete_pet),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
