//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use nutribite_core::{DeliveryStatus, OrderStatus, Page, VehicleType};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// ============================================================================
// Paging
// ============================================================================

/// 1-based page window taken from `?page=&per_page=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u32 = 20;
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamp raw query values into a usable window
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn to_page(self) -> Page {
        let limit = i64::from(self.per_page);
        Page {
            limit,
            offset: i64::from(self.page - 1) * limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Customer registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 3, max = 32, message = "Phone must be 3-32 characters"))]
    pub phone: Option<String>,
}

/// Column used to look the account up at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Phone,
}

/// Login request shared by the customer and admin entry points.
///
/// The account is named by `identifier`, or by `email` for older clients.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_login_identifier"))]
pub struct LoginRequest {
    pub email: Option<String>,

    pub identifier: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(rename = "loginMethod", default)]
    pub login_method: LoginMethod,
}

impl LoginRequest {
    /// The trimmed account identifier, `identifier` taking precedence over `email`
    pub fn account(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .or(self.email.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn validate_login_identifier(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.account().is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("identifier");
        err.message = Some("Email or identifier is required".into());
        Err(err)
    }
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 32, message = "Phone must be 3-32 characters"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// Customer Requests
// ============================================================================

/// Profile upsert; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertCustomerRequest {
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: Option<String>,

    pub dietary_preferences: Option<Vec<String>>,

    pub allergies: Option<Vec<String>>,
}

// ============================================================================
// Courier Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourierRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 3, max = 32, message = "Phone must be 3-32 characters"))]
    pub phone: Option<String>,

    pub vehicle_type: VehicleType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub available: bool,
}

// ============================================================================
// Admin User Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub status: Option<String>,
}

/// Ban now, or at `effective_at` when it lies in the future
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BanUserRequest {
    pub effective_at: Option<DateTime<Utc>>,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

// ============================================================================
// Order Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub recipe_id: i64,

    #[validate(range(min = 1, max = 50, message = "Quantity must be 1-50"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(
        length(min = 1, max = 50, message = "An order needs 1-50 items"),
        nested
    )]
    pub items: Vec<OrderItemRequest>,

    #[validate(length(min = 1, max = 255, message = "Delivery address is required"))]
    pub delivery_address: String,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

// ============================================================================
// Delivery Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AssignDeliveryRequest {
    pub order_id: i64,
    pub courier_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeliveryStatusRequest {
    pub status: DeliveryStatus,
}

// ============================================================================
// Recipe Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeSearchQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub ingredients: Vec<String>,

    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories: Option<i32>,

    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein_g: Option<f64>,

    #[validate(range(min = 0.0, message = "Carbs cannot be negative"))]
    pub carbs_g: Option<f64>,

    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat_g: Option<f64>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub ingredients: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories: Option<i32>,

    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein_g: Option<f64>,

    #[validate(range(min = 0.0, message = "Carbs cannot be negative"))]
    pub carbs_g: Option<f64>,

    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat_g: Option<f64>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: Option<i64>,

    pub tags: Option<Vec<String>>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

// ============================================================================
// Notification Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub user_id: i64,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Body must be 1-2000 characters"))]
    pub body: String,
}

// ============================================================================
// Message Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub recipient_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(Some(0), Some(500));
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, PageRequest::MAX_PER_PAGE);

        let page = PageRequest::new(Some(3), Some(10)).to_page();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            password: "Sup3rsecret".to_string(),
            phone: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_request_accepts_email_or_identifier() {
        let json = r#"{"email":"a@b.co","password":"x"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.account(), Some("a@b.co"));
        assert_eq!(req.login_method, LoginMethod::Email);
        assert!(req.validate().is_ok());

        let json = r#"{"identifier":" +15550100 ","password":"x","loginMethod":"phone"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.account(), Some("+15550100"));
        assert_eq!(req.login_method, LoginMethod::Phone);

        let json = r#"{"identifier":"  ","password":"x"}"#;
        let req: LoginRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_order_validation() {
        let order = CreateOrderRequest {
            items: vec![OrderItemRequest {
                recipe_id: 1,
                quantity: 2,
            }],
            delivery_address: "1 Main St".to_string(),
            notes: None,
        };
        assert!(order.validate().is_ok());

        let empty = CreateOrderRequest {
            items: vec![],
            ..order.clone()
        };
        assert!(empty.validate().is_err());

        let too_many = CreateOrderRequest {
            items: vec![OrderItemRequest {
                recipe_id: 1,
                quantity: 51,
            }],
            ..order
        };
        let errors = too_many.validate().unwrap_err();
        assert!(errors.errors().contains_key("items"));
    }

    #[test]
    fn test_ban_request_parses_rfc3339() {
        let req: BanUserRequest =
            serde_json::from_str(r#"{"effective_at":"2030-05-01T12:00:00Z","reason":"spam"}"#)
                .unwrap();
        assert!(req.effective_at.is_some());

        let req: BanUserRequest = serde_json::from_str("{}").unwrap();
        assert!(req.effective_at.is_none());
    }

    #[test]
    fn test_send_message_validation() {
        let ok = SendMessageRequest {
            recipient_id: 2,
            body: "hello".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = SendMessageRequest {
            recipient_id: 2,
            body: "a".repeat(nutribite_core::MAX_MESSAGE_LENGTH + 1),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_order_status_query_parses_snake_case() {
        let q: UpdateOrderStatusRequest =
            serde_json::from_str(r#"{"status":"out_for_delivery"}"#).unwrap();
        assert_eq!(q.status, OrderStatus::OutForDelivery);
    }
}
