//! # nutribite-service
//!
//! Application layer: business services, the access guard that enforces
//! bans, and request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccessGuard, AdminUserService, AuthService, BanReconciler, CourierService, CustomerService,
    DeliveryService, IssuedSession, MessageService, NotificationService, OrderService,
    RecipeService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    UserService,
};
