//! Courier database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for couriers table
#[derive(Debug, Clone, FromRow)]
pub struct CourierModel {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_type: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
