//! Order database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for orders table
#[derive(Debug, Clone, FromRow)]
pub struct OrderModel {
    pub id: i64,
    pub customer_id: i64,
    pub status: String,
    pub total_cents: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for order_items table
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemModel {
    pub order_id: i64,
    pub recipe_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
}
