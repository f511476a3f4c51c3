//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::{DeliveryStatus, OrderStatus};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Customer profile not found for user {0}")]
    CustomerNotFound(i64),

    #[error("Courier not found: {0}")]
    CourierNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Delivery not found: {0}")]
    DeliveryNotFound(i64),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    #[error("Notification not found: {0}")]
    NotificationNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Order must contain at least one item")]
    EmptyOrder,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Account is banned")]
    AccountBanned,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Courier access required")]
    CourierRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Phone number already in use")]
    PhoneAlreadyExists,

    #[error("Cannot move order from {from} to {to}")]
    InvalidOrderTransition { from: OrderStatus, to: OrderStatus },

    #[error("Cannot move delivery from {from} to {to}")]
    InvalidDeliveryTransition {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    #[error("Order {0} already has a delivery")]
    DeliveryAlreadyAssigned(i64),

    #[error("Order in status {0} cannot be assigned a courier")]
    OrderNotAssignable(OrderStatus),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot ban yourself")]
    CannotBanSelf,

    #[error("Cannot send a message to yourself")]
    CannotMessageSelf,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CustomerNotFound(_) => "UNKNOWN_CUSTOMER",
            Self::CourierNotFound(_) => "UNKNOWN_COURIER",
            Self::OrderNotFound(_) => "UNKNOWN_ORDER",
            Self::DeliveryNotFound(_) => "UNKNOWN_DELIVERY",
            Self::RecipeNotFound(_) => "UNKNOWN_RECIPE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::EmptyOrder => "EMPTY_ORDER",

            // Authorization
            Self::AccountBanned => "ACCOUNT_BANNED",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::CourierRequired => "COURIER_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            Self::InvalidOrderTransition { .. } => "INVALID_ORDER_TRANSITION",
            Self::InvalidDeliveryTransition { .. } => "INVALID_DELIVERY_TRANSITION",
            Self::DeliveryAlreadyAssigned(_) => "DELIVERY_ALREADY_ASSIGNED",
            Self::OrderNotAssignable(_) => "ORDER_NOT_ASSIGNABLE",

            // Business Rules
            Self::CannotBanSelf => "CANNOT_BAN_SELF",
            Self::CannotMessageSelf => "CANNOT_MESSAGE_SELF",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CustomerNotFound(_)
                | Self::CourierNotFound(_)
                | Self::OrderNotFound(_)
                | Self::DeliveryNotFound(_)
                | Self::RecipeNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::EmptyOrder
                | Self::CannotBanSelf
                | Self::CannotMessageSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AccountBanned | Self::AdminRequired | Self::CourierRequired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::PhoneAlreadyExists
                | Self::InvalidOrderTransition { .. }
                | Self::InvalidDeliveryTransition { .. }
                | Self::DeliveryAlreadyAssigned(_)
                | Self::OrderNotAssignable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound(1).code(), "UNKNOWN_USER");
        assert_eq!(DomainError::AccountBanned.code(), "ACCOUNT_BANNED");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::OrderNotFound(1).is_not_found());
        assert!(DomainError::AccountBanned.is_authorization());
        assert!(DomainError::CannotBanSelf.is_validation());
        assert!(DomainError::InvalidOrderTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        }
        .is_conflict());
        assert!(!DomainError::DatabaseError("down".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::AccountBanned.to_string(), "Account is banned");
        assert_eq!(DomainError::AdminRequired.to_string(), "Admin access required");

        let err = DomainError::InvalidOrderTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        };
        assert_eq!(err.to_string(), "Cannot move order from pending to delivered");
    }
}
