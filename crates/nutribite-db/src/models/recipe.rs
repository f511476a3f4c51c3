//! Recipe database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for recipes table
#[derive(Debug, Clone, FromRow)]
pub struct RecipeModel {
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
