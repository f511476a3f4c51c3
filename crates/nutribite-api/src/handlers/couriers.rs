//! Courier handlers
//!
//! Admins manage the fleet; couriers read their own record and toggle
//! availability.

use axum::{extract::State, Json};
use nutribite_service::dto::{CourierResponse, CreateCourierRequest, UpdateAvailabilityRequest};
use nutribite_service::CourierService;

use crate::extractors::{AuthUser, IdPath, JsonBody, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /api/admin/couriers
pub async fn list_couriers(State(state): State<AppState>) -> ApiResult<Json<Vec<CourierResponse>>> {
    let couriers = CourierService::new(state.service_context()).list().await?;
    Ok(Json(couriers))
}

/// POST /api/admin/couriers
pub async fn create_courier(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCourierRequest>,
) -> ApiResult<Created<Json<CourierResponse>>> {
    let courier = CourierService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(courier)))
}

/// DELETE /api/admin/couriers/:id
pub async fn delete_courier(
    State(state): State<AppState>,
    IdPath(courier_id): IdPath,
) -> ApiResult<NoContent> {
    CourierService::new(state.service_context())
        .delete(courier_id)
        .await?;
    Ok(NoContent)
}

/// GET /api/couriers/me
pub async fn get_own_courier(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<CourierResponse>> {
    let courier = CourierService::new(state.service_context()).me(&user).await?;
    Ok(Json(courier))
}

/// PATCH /api/couriers/me/availability
pub async fn set_availability(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(request): JsonBody<UpdateAvailabilityRequest>,
) -> ApiResult<Json<CourierResponse>> {
    let courier = CourierService::new(state.service_context())
        .set_availability(&user, request.available)
        .await?;
    Ok(Json(courier))
}
