//! Recipe entity <-> model mapper

use nutribite_core::entities::Recipe;

use crate::models::RecipeModel;

impl From<RecipeModel> for Recipe {
    fn from(model: RecipeModel) -> Self {
        Recipe {
            id: model.id,
            title: model.title,
            description: model.description,
            ingredients: model.ingredients,
            calories: model.calories,
            protein_g: model.protein_g,
            carbs_g: model.carbs_g,
            fat_g: model.fat_g,
            price_cents: model.price_cents,
            tags: model.tags,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
