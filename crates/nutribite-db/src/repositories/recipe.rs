//! PostgreSQL implementation of RecipeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{NewRecipe, Recipe, RecipeQuery};
use nutribite_core::error::DomainError;
use nutribite_core::traits::{RecipeRepository, RepoResult};

use crate::models::RecipeModel;

use super::error::map_db_error;

const RECIPE_COLUMNS: &str = "id, title, description, ingredients, calories, protein_g, carbs_g, \
                              fat_g, price_cents, tags, image_url, created_at, updated_at";

/// PostgreSQL implementation of RecipeRepository
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Recipe>> {
        let result = sqlx::query_as::<_, RecipeModel>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Recipe::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, ids: &[i64]) -> RepoResult<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, RecipeModel>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &RecipeQuery) -> RepoResult<Vec<Recipe>> {
        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let rows = sqlx::query_as::<_, RecipeModel>(&format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes
            WHERE ($1::TEXT IS NULL OR title ILIKE $1 OR description ILIKE $1)
              AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM unnest(tags) AS tag WHERE LOWER(tag) = LOWER($2)))
            ORDER BY title, id
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(pattern)
        .bind(query.tag.as_deref())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self, recipe), fields(title = %recipe.title))]
    async fn create(&self, recipe: &NewRecipe) -> RepoResult<Recipe> {
        let row = sqlx::query_as::<_, RecipeModel>(&format!(
            r"
            INSERT INTO recipes (title, description, ingredients, calories, protein_g, carbs_g,
                                 fat_g, price_cents, tags, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RECIPE_COLUMNS}
            "
        ))
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(recipe.calories)
        .bind(recipe.protein_g)
        .bind(recipe.carbs_g)
        .bind(recipe.fat_g)
        .bind(recipe.price_cents)
        .bind(&recipe.tags)
        .bind(&recipe.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Recipe::from(row))
    }

    #[instrument(skip(self, recipe), fields(recipe_id = recipe.id))]
    async fn update(&self, recipe: &Recipe) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE recipes
            SET title = $2, description = $3, ingredients = $4, calories = $5,
                protein_g = $6, carbs_g = $7, fat_g = $8, price_cents = $9,
                tags = $10, image_url = $11, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&recipe.ingredients)
        .bind(recipe.calories)
        .bind(recipe.protein_g)
        .bind(recipe.carbs_g)
        .bind(recipe.fat_g)
        .bind(recipe.price_cents)
        .bind(&recipe.tags)
        .bind(&recipe.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecipeNotFound(recipe.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecipeNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("kale"), "%kale%");
        assert_eq!(like_pattern("100%_raw"), "%100\\%\\_raw%");
    }
}
