//! Caller identity extractors.
//!
//! A token is read from `Authorization: Bearer <token>` first and from the
//! session cookie otherwise. Every accepted token maps to a live session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum_extra::TypedHeader;
use axum_extra::extract::CookieJar;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use petadopt_core::error::{AppError, ErrorKind};
use petadopt_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

const NOT_PROVIDED: &str = "Authentication credentials were not provided.";

/// Where a request's token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer`.
    Header(String),
    /// The session cookie.
    Cookie(String),
}

impl Credential {
    /// The raw token.
    pub fn token(&self) -> &str {
        match self {
            Self::Header(t) | Self::Cookie(t) => t,
        }
    }
}

/// Read the caller's credential from the request parts.
///
/// A present but malformed `Authorization` header is an error.
pub async fn read_credential(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<Credential>, AppError> {
    match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
        Ok(TypedHeader(Authorization(bearer))) => {
            return Ok(Some(Credential::Header(bearer.token().to_string())));
        }
        Err(rejection) if !rejection.is_missing() => {
            return Err(AppError::authentication("Invalid Authorization header"));
        }
        Err(_) => {}
    }

    let jar = CookieJar::from_headers(&parts.headers);
    Ok(jar
        .get(&state.config.auth.cookie_name)
        .map(|c| Credential::Cookie(c.value().to_string())))
}

async fn resolve(
    credential: &Credential,
    headers: &HeaderMap,
    state: &AppState,
) -> Result<RequestContext, AppError> {
    let auth = state.session_manager.authenticate(credential.token()).await?;
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    Ok(RequestContext::new(
        auth.user.id,
        auth.session.id,
        auth.user.username,
        user_agent,
    ))
}

/// Resolve a credential whose failure to authenticate means "anonymous".
///
/// Only authentication failures are swallowed; store errors propagate.
async fn resolve_or_anonymous(
    credential: &Credential,
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Option<RequestContext>, AppError> {
    match resolve(credential, headers, state).await {
        Ok(ctx) => Ok(Some(ctx)),
        Err(err) if err.is(ErrorKind::Authentication) => Ok(None),
        Err(err) => Err(err),
    }
}

/// An authenticated caller. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = read_credential(parts, state)
            .await?
            .ok_or_else(|| AppError::authentication(NOT_PROVIDED))?;
        let ctx = resolve(&credential, &parts.headers, state).await?;
        Ok(AuthUser(ctx))
    }
}

/// An optional caller.
///
/// Anonymous requests yield `None`. A bad bearer token still rejects
/// with 401; a stale cookie is treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    /// The caller's context, if authenticated.
    pub fn context(&self) -> Option<&RequestContext> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ctx = match read_credential(parts, state).await? {
            None => None,
            Some(credential @ Credential::Header(_)) => {
                Some(resolve(&credential, &parts.headers, state).await?)
            }
            Some(credential @ Credential::Cookie(_)) => {
                resolve_or_anonymous(&credential, &parts.headers, state).await?
            }
        };
        Ok(MaybeAuthUser(ctx))
    }
}

/// The caller if a valid credential is present, without ever rejecting.
///
/// Used by logout, which succeeds for anonymous and stale callers alike.
/// A failing store still rejects.
#[derive(Debug, Clone)]
pub struct LenientAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for LenientAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ctx = match read_credential(parts, state).await {
            Ok(Some(credential)) => {
                resolve_or_anonymous(&credential, &parts.headers, state).await?
            }
            Ok(None) | Err(_) => None,
        };
        Ok(LenientAuthUser(ctx))
    }
}
