//! Recipe handlers
//!
//! Catalogue reads are public; writes sit behind the admin gate.

use axum::{
    extract::{Query, State},
    Json,
};
use nutribite_service::dto::{
    CreateRecipeRequest, PaginatedResponse, RecipeResponse, RecipeSearchQuery,
    UpdateRecipeRequest,
};
use nutribite_service::RecipeService;

use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /api/recipes?search=&tag=
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeSearchQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<RecipeResponse>>> {
    let recipes = RecipeService::new(state.service_context())
        .search(query, page)
        .await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = RecipeService::new(state.service_context())
        .get(recipe_id)
        .await?;
    Ok(Json(recipe))
}

/// POST /api/admin/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRecipeRequest>,
) -> ApiResult<Created<Json<RecipeResponse>>> {
    let recipe = RecipeService::new(state.service_context())
        .create(request)
        .await?;
    Ok(Created(Json(recipe)))
}

/// PATCH /api/admin/recipes/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = RecipeService::new(state.service_context())
        .update(recipe_id, request)
        .await?;
    Ok(Json(recipe))
}

/// DELETE /api/admin/recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    RecipeService::new(state.service_context())
        .delete(recipe_id)
        .await?;
    Ok(NoContent)
}
