//! JSON body extraction with field validation.
//!
//! Malformed bodies and wrong JSON types are reported as 400 validation
//! errors in the standard error shape.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use petadopt_core::error::{AppError, NON_FIELD_ERRORS};

use crate::error::ApiError;

/// A JSON body that has been deserialized and validated.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        parse_body(&bytes).map(ValidatedJson)
    }
}

/// Deserialize and validate a raw body.
///
/// Handlers that must check existence and permissions before looking at
/// the body take `Bytes` and call this afterwards.
pub fn parse_body<T: DeserializeOwned + Validate>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: T = serde_json::from_slice(bytes).map_err(|e| {
        AppError::field(NON_FIELD_ERRORS, format!("JSON parse error - {e}"))
            .with_message("Malformed request body")
    })?;
    value.validate()?;
    Ok(value)
}
