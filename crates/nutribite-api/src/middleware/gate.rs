//! Session and admin gates
//!
//! The session gate runs in front of every `/api` route. It resolves the
//! session cookie and refuses effectively banned users with 403 whatever the
//! route, clearing the session cookie on the way out.
//! Admitted users reach the handlers as [`CurrentUser`]; lookup failures
//! leave the request anonymous.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use nutribite_service::AuthService;
use tracing::debug;

use crate::extractors::CurrentUser;
use crate::response::ApiError;
use crate::state::AppState;

pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = jar.get(state.cookie_name()).map(|c| c.value().to_string()) else {
        return next.run(request).await;
    };

    let auth = AuthService::new(state.service_context());
    match auth.resolve_session(&session_id).await {
        Ok(Some(user)) => {
            debug!(user_id = user.id, "Session resolved");
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        // banned: the cookie goes with the 403 so the client stops sending it
        Err(e) if e.is_banned() => {
            (jar.remove(state.removal_cookie()), ApiError::from(e)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Only admins past this point; the session gate has already run
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(CurrentUser(user)) = request.extensions().get::<CurrentUser>() else {
        return ApiError::Unauthenticated.into_response();
    };
    if let Err(e) = state.service_context().access_guard().require_admin(user) {
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}
