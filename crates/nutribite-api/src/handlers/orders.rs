//! Order handlers

use axum::{
    extract::{Query, State},
    Json,
};
use nutribite_service::dto::{
    CreateOrderRequest, OrderListQuery, OrderResponse, PaginatedResponse,
    UpdateOrderStatusRequest,
};
use nutribite_service::OrderService;

use crate::extractors::{AuthUser, IdPath, JsonBody, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Place an order; prices come from the catalogue
///
/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<Created<Json<OrderResponse>>> {
    let order = OrderService::new(state.service_context())
        .create(auth.id(), request)
        .await?;
    Ok(Created(Json(order)))
}

/// GET /api/orders
pub async fn list_own_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<OrderResponse>>> {
    let orders = OrderService::new(state.service_context())
        .list_own(auth.id(), page)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_own_order(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::new(state.service_context())
        .get_own(auth.id(), order_id)
        .await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::new(state.service_context())
        .cancel(auth.id(), order_id)
        .await?;
    Ok(Json(order))
}

/// GET /api/admin/orders
pub async fn list_all_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<OrderResponse>>> {
    let orders = OrderService::new(state.service_context())
        .list_all(query.status, page)
        .await?;
    Ok(Json(orders))
}

/// PATCH /api/admin/orders/:id/status
pub async fn update_order_status(
    State(state): State<AppState>,
    IdPath(order_id): IdPath,
    JsonBody(request): JsonBody<UpdateOrderStatusRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let order = OrderService::new(state.service_context())
        .update_status(order_id, request.status)
        .await?;
    Ok(Json(order))
}
