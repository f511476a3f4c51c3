//! Recipe entity - a meal on the menu with its nutrition facts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub calories: Option<i32>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub price_cents: i64,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Energy derived from macros (4/4/9 kcal per gram), when all three are known
    pub fn macro_calories(&self) -> Option<f64> {
        Some(self.protein_g? * 4.0 + self.carbs_g? * 4.0 + self.fat_g? * 9.0)
    }
}

/// Values needed to insert a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub calories: Option<i32>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub price_cents: i64,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

/// Filters for recipe listing
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    /// Matched against title and description
    pub search: Option<String>,
    pub tag: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        let now = Utc::now();
        Recipe {
            id: 1,
            title: "Lentil bowl".to_string(),
            description: None,
            ingredients: vec!["lentils".to_string(), "spinach".to_string()],
            calories: Some(520),
            protein_g: Some(30.0),
            carbs_g: Some(60.0),
            fat_g: Some(10.0),
            price_cents: 1150,
            tags: vec!["Vegan".to_string(), "high-protein".to_string()],
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_has_tag() {
        let recipe = recipe();
        assert!(recipe.has_tag("vegan"));
        assert!(!recipe.has_tag("keto"));
    }

    #[test]
    fn test_macro_calories() {
        let mut recipe = recipe();
        assert_eq!(recipe.macro_calories(), Some(450.0));

        recipe.fat_g = None;
        assert_eq!(recipe.macro_calories(), None);
    }
}
