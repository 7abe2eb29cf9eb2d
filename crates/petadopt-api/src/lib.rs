//! # petadopt-api
//!
//! HTTP API layer for PetAdopt built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, compression, request
//! logging, trailing-slash normalization), extractors, DTOs and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_service, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
