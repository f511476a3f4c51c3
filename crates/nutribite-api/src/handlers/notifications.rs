//! Notification handlers

use axum::{
    extract::{Query, State},
    Json,
};
use nutribite_service::dto::{
    CreateNotificationRequest, NotificationListQuery, NotificationResponse, PaginatedResponse,
    UpdatedCountResponse,
};
use nutribite_service::NotificationService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /api/notifications?unread=
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationListQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<NotificationResponse>>> {
    let notifications = NotificationService::new(state.service_context())
        .list(auth.id(), query.unread, page)
        .await?;
    Ok(Json(notifications))
}

/// POST /api/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    NotificationService::new(state.service_context())
        .mark_read(auth.id(), notification_id)
        .await?;
    Ok(NoContent)
}

/// POST /api/notifications/read-all
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UpdatedCountResponse>> {
    let response = NotificationService::new(state.service_context())
        .mark_all_read(auth.id())
        .await?;
    Ok(Json(response))
}

/// POST /api/admin/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<Created<Json<NotificationResponse>>> {
    let notification = NotificationService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(notification)))
}
