//! Customer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for customers table
#[derive(Debug, Clone, FromRow)]
pub struct CustomerModel {
    pub user_id: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
