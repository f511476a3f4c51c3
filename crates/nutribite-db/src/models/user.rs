//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table.
///
/// `ban_effective_at` is selected as text (`ban_effective_at::TEXT`) and
/// decoded by the mapper, so odd stored values never fail the whole row.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: String,
    pub status: Option<String>,
    pub ban_effective_at: Option<String>,
    pub banned_at: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
