//! Authentication handlers
//!
//! Registration, login and logout for customers and couriers, plus the admin
//! login and session endpoints. A session is a Redis entry whose id travels
//! in an HttpOnly cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use nutribite_service::dto::{LoginRequest, RegisterRequest, SessionResponse};
use nutribite_service::{AuthService, IssuedSession};
use tracing::warn;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn with_session(
    state: &AppState,
    jar: CookieJar,
    issued: IssuedSession,
) -> (CookieJar, Json<SessionResponse>) {
    (
        jar.add(state.session_cookie(issued.session_id)),
        Json(issued.response),
    )
}

/// Register a customer and sign them in
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(CookieJar, Created<Json<SessionResponse>>)> {
    let issued = AuthService::new(state.service_context())
        .register(request)
        .await?;
    let (jar, body) = with_session(&state, jar, issued);
    Ok((jar, Created(body)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let issued = AuthService::new(state.service_context())
        .login(request)
        .await?;
    Ok(with_session(&state, jar, issued))
}

/// Destroy the session and clear the cookie
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    if let Some(cookie) = jar.get(state.cookie_name()) {
        if let Err(e) = AuthService::new(state.service_context())
            .logout(cookie.value())
            .await
        {
            warn!(error = %e, "Failed to destroy session on logout");
        }
    }
    (jar.remove(state.removal_cookie()), NoContent)
}

/// GET /api/auth/session
pub async fn session(AuthUser(user): AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse::from(&user))
}

/// Admin login; a banned account gets 403 and no cookie
///
/// POST /api/admin/auth/login
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let issued = AuthService::new(state.service_context())
        .admin_login(request)
        .await?;
    Ok(with_session(&state, jar, issued))
}

/// GET /api/admin/auth/session
pub async fn admin_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<SessionResponse>> {
    let response = AuthService::new(state.service_context()).admin_session(&user)?;
    Ok(Json(response))
}
