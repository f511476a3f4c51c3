//! User handlers
//!
//! The signed-in user's own account.

use axum::{extract::State, Json};
use nutribite_service::dto::{ChangePasswordRequest, UpdateUserRequest, UserResponse};
use nutribite_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// PATCH /api/users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_user(auth.id(), request).await?;
    Ok(Json(response))
}

/// POST /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    UserService::new(state.service_context())
        .change_password(auth.id(), request)
        .await?;
    Ok(NoContent)
}
