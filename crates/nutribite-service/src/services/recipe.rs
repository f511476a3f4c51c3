//! Recipe service
//!
//! Public catalogue reads plus admin curation.

use chrono::Utc;
use nutribite_core::entities::{NewRecipe, Recipe, RecipeQuery};
use nutribite_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CreateRecipeRequest, PageRequest, PaginatedResponse, RecipeResponse, RecipeSearchQuery,
    UpdateRecipeRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct RecipeService<'a> {
    ctx: &'a ServiceContext,
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Merge a partial update into the stored recipe
fn apply_update(recipe: &mut Recipe, request: UpdateRecipeRequest) -> Result<(), ServiceError> {
    if let Some(title) = request.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ServiceError::validation("Title cannot be blank"));
        }
        recipe.title = title;
    }
    if request.description.is_some() {
        recipe.description = non_blank(request.description);
    }
    if let Some(ingredients) = request.ingredients {
        recipe.ingredients = clean_list(ingredients);
    }
    if let Some(calories) = request.calories {
        recipe.calories = Some(calories);
    }
    if let Some(protein) = request.protein_g {
        recipe.protein_g = Some(protein);
    }
    if let Some(carbs) = request.carbs_g {
        recipe.carbs_g = Some(carbs);
    }
    if let Some(fat) = request.fat_g {
        recipe.fat_g = Some(fat);
    }
    if let Some(price) = request.price_cents {
        recipe.price_cents = price;
    }
    if let Some(tags) = request.tags {
        recipe.tags = clean_list(tags);
    }
    if request.image_url.is_some() {
        recipe.image_url = non_blank(request.image_url);
    }
    recipe.updated_at = Utc::now();
    Ok(())
}

impl<'a> RecipeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: RecipeSearchQuery,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<RecipeResponse>> {
        let window = page.to_page();
        let recipes = self
            .ctx
            .recipe_repo()
            .search(&RecipeQuery {
                search: non_blank(query.search),
                tag: non_blank(query.tag),
                limit: window.limit,
                offset: window.offset,
            })
            .await?;

        let data = recipes.into_iter().map(RecipeResponse::from).collect();
        Ok(PaginatedResponse::new(data, page.page, page.per_page, None))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, recipe_id: i64) -> ServiceResult<RecipeResponse> {
        Ok(RecipeResponse::from(self.load(recipe_id).await?))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, request: CreateRecipeRequest) -> ServiceResult<RecipeResponse> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(ServiceError::validation("Title cannot be blank"));
        }

        let recipe = self
            .ctx
            .recipe_repo()
            .create(&NewRecipe {
                title,
                description: non_blank(request.description),
                ingredients: clean_list(request.ingredients),
                calories: request.calories,
                protein_g: request.protein_g,
                carbs_g: request.carbs_g,
                fat_g: request.fat_g,
                price_cents: request.price_cents,
                tags: clean_list(request.tags),
                image_url: non_blank(request.image_url),
            })
            .await?;

        info!(recipe_id = recipe.id, "Recipe created");
        Ok(RecipeResponse::from(recipe))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        recipe_id: i64,
        request: UpdateRecipeRequest,
    ) -> ServiceResult<RecipeResponse> {
        let mut recipe = self.load(recipe_id).await?;
        apply_update(&mut recipe, request)?;
        self.ctx.recipe_repo().update(&recipe).await?;

        info!(recipe_id, "Recipe updated");
        Ok(RecipeResponse::from(recipe))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, recipe_id: i64) -> ServiceResult<()> {
        self.load(recipe_id).await?;
        self.ctx.recipe_repo().delete(recipe_id).await?;
        info!(recipe_id, "Recipe deleted");
        Ok(())
    }

    async fn load(&self, recipe_id: i64) -> ServiceResult<Recipe> {
        Ok(self
            .ctx
            .recipe_repo()
            .find_by_id(recipe_id)
            .await?
            .ok_or(DomainError::RecipeNotFound(recipe_id))?)
    }
}
