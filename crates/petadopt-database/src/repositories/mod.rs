//! PostgreSQL implementations of the store traits.

pub mod pet;
pub mod session;
pub mod user;

pub use pet::PetRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

use petadopt_core::error::{AppError, ErrorKind};

/// Map a sqlx error to a database `AppError` with the given context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
