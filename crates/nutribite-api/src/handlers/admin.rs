//! Admin user management handlers

use axum::{
    extract::{Query, State},
    Json,
};
use nutribite_service::dto::{AdminUserResponse, BanUserRequest, PaginatedResponse, UserListQuery};
use nutribite_service::AdminUserService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/admin/users?status=
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<AdminUserResponse>>> {
    let users = AdminUserService::new(state.service_context())
        .list(query, page)
        .await?;
    Ok(Json(users))
}

/// GET /api/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<AdminUserResponse>> {
    let user = AdminUserService::new(state.service_context())
        .get(user_id)
        .await?;
    Ok(Json(user))
}

/// Ban now, or schedule with a future `effective_at`
///
/// POST /api/admin/users/:id/ban
pub async fn ban_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<BanUserRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let user = AdminUserService::new(state.service_context())
        .ban(&admin, user_id, request)
        .await?;
    Ok(Json(user))
}

/// POST /api/admin/users/:id/unban
pub async fn unban_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<AdminUserResponse>> {
    let user = AdminUserService::new(state.service_context())
        .unban(user_id)
        .await?;
    Ok(Json(user))
}
