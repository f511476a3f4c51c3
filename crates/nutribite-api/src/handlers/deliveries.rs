//! Delivery handlers

use axum::{extract::State, Json};
use nutribite_service::dto::{AssignDeliveryRequest, DeliveryResponse, UpdateDeliveryStatusRequest};
use nutribite_service::DeliveryService;

use crate::extractors::{AuthUser, IdPath, JsonBody};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/admin/deliveries
pub async fn assign_delivery(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AssignDeliveryRequest>,
) -> ApiResult<Created<Json<DeliveryResponse>>> {
    let delivery = DeliveryService::new(state.service_context())
        .assign(request)
        .await?;
    Ok(Created(Json(delivery)))
}

/// GET /api/deliveries
pub async fn list_own_deliveries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<DeliveryResponse>>> {
    let deliveries = DeliveryService::new(state.service_context())
        .list_own(&user)
        .await?;
    Ok(Json(deliveries))
}

/// PATCH /api/deliveries/:id/status
pub async fn update_delivery_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    IdPath(delivery_id): IdPath,
    JsonBody(request): JsonBody<UpdateDeliveryStatusRequest>,
) -> ApiResult<Json<DeliveryResponse>> {
    let delivery = DeliveryService::new(state.service_context())
        .update_status(&user, delivery_id, request.status)
        .await?;
    Ok(Json(delivery))
}
