//! Customer profile handlers

use axum::{extract::State, Json};
use nutribite_service::dto::{CustomerResponse, UpsertCustomerRequest};
use nutribite_service::CustomerService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/customers/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CustomerResponse>> {
    let response = CustomerService::new(state.service_context())
        .get_profile(auth.id())
        .await?;
    Ok(Json(response))
}

/// PUT /api/customers/me
pub async fn upsert_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertCustomerRequest>,
) -> ApiResult<Json<CustomerResponse>> {
    let response = CustomerService::new(state.service_context())
        .upsert_profile(auth.id(), request)
        .await?;
    Ok(Json(response))
}
