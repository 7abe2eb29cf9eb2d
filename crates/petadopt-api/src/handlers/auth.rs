//! Auth handlers: register, login, logout and the current user's profile.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::dto::request::{LoginRequest, ProfileRequest, RegisterRequest};
use crate::dto::response::{DetailResponse, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, LenientAuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .register(req.into_registration()?)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
///
/// Returns the token in the body and sets it as an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let (username, password) = req.into_credentials()?;
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let result = state
        .session_manager
        .login(&username, &password, user_agent)
        .await?;

    let cookie = Cookie::build((
        state.config.auth.cookie_name.clone(),
        result.token.token.clone(),
    ))
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(state.config.auth.cookie_secure)
    .path("/");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token: result.token.token,
            expires_at: result.token.expires_at,
            user: result.user.into(),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Always succeeds. Ends the caller's session when one is attached.
pub async fn logout(
    State(state): State<AppState>,
    LenientAuthUser(caller): LenientAuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<DetailResponse>)> {
    if let Some(ctx) = caller {
        state.session_manager.logout(ctx.session_id).await?;
    }
    let jar = jar.remove(Cookie::build(state.config.auth.cookie_name.clone()).path("/"));
    Ok((jar, Json(DetailResponse::new("Successfully logged out."))))
}

/// GET /api/auth/user
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(user.into()))
}

/// PUT /api/auth/user
pub async fn replace_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.require_complete()?;
    let user = state
        .user_service
        .update_profile(&auth, req.into_update())
        .await?;
    Ok(Json(user.into()))
}

/// PATCH /api/auth/user
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile(&auth, req.into_update())
        .await?;
    Ok(Json(user.into()))
}
