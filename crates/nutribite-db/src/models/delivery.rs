//! Delivery database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for deliveries table
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryModel {
    pub id: i64,
    pub order_id: i64,
    pub courier_id: Option<i64>,
    pub status: String,
    pub assigned_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
