//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for one request and
//! orchestrates repositories, the session store and the access guard.

pub mod access;
pub mod admin;
pub mod auth;
pub mod context;
pub mod courier;
pub mod customer;
pub mod delivery;
pub mod error;
pub mod message;
pub mod notification;
pub mod order;
pub mod recipe;
pub mod user;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use access::{AccessGuard, BanReconciler};
pub use admin::AdminUserService;
pub use auth::{AuthService, IssuedSession};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use courier::CourierService;
pub use customer::CustomerService;
pub use delivery::DeliveryService;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use notification::NotificationService;
pub use order::OrderService;
pub use recipe::RecipeService;
pub use user::UserService;
