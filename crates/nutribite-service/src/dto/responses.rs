//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use nutribite_core::{DeliveryStatus, OrderStatus, UserType, VehicleType};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-numbered listing
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// `has_more` is inferred from a full page when no total is known
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: Option<i64>) -> Self {
        let has_more = match total {
            Some(total) => i64::from(page) * i64::from(per_page) < total,
            None => data.len() == per_page as usize,
        };
        Self {
            data,
            pagination: PaginationMeta {
                page,
                per_page,
                total,
                has_more,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    pub has_more: bool,
}

/// Number of rows a bulk action changed
#[derive(Debug, Serialize)]
pub struct UpdatedCountResponse {
    pub updated: u64,
}

// ============================================================================
// User Responses
// ============================================================================

/// The account as its owner (and the session endpoints) see it
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub status: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Admin view, including ban bookkeeping
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub ban_effective_at: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    /// Evaluated at response time, so an elapsed schedule shows as banned
    pub effectively_banned: bool,
}

/// Login / session payload
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
}

// ============================================================================
// Customer / Courier Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub user_id: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourierResponse {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_type: VehicleType,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

// ============================================================================
// Order / Delivery Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub recipe_id: i64,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResponse {
    pub id: i64,
    pub order_id: i64,
    pub courier_id: Option<i64>,
    pub status: DeliveryStatus,
    pub assigned_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Recipe Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub calories: Option<i32>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_calories: Option<f64>,
    pub price_cents: i64,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Notification / Message Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub peer_id: i64,
    pub peer_name: String,
    pub last_message: MessageResponse,
    pub unread_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Probe result per dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

fn probe(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: probe(database_healthy),
                redis: probe(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_with_total() {
        let page = PaginatedResponse::new(vec![1, 2], 1, 2, Some(5));
        assert!(page.pagination.has_more);

        let last = PaginatedResponse::new(vec![5], 3, 2, Some(5));
        assert!(!last.pagination.has_more);
    }

    #[test]
    fn test_pagination_without_total() {
        let full = PaginatedResponse::new(vec![1, 2, 3], 1, 3, None);
        assert!(full.pagination.has_more);

        let json = serde_json::to_value(PaginatedResponse::new(vec![1], 1, 3, None)).unwrap();
        assert_eq!(json["pagination"]["has_more"], false);
        assert!(json["pagination"].get("total").is_none());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true, true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");

        let degraded = ReadinessResponse::ready(true, false);
        assert_eq!(degraded.status, "not_ready");
        assert_eq!(degraded.checks.redis, "unhealthy");
    }
}
