//! # nutribite-core
//!
//! Domain layer containing entities, the ban evaluator, repository traits and
//! the session store port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod ban;
pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use ban::{is_effectively_banned, parse_effective_at, BanAssessment};
pub use entities::{
    AccountStatus, Conversation, Courier, Customer, Delivery, DeliveryStatus, Message,
    NewNotification, NewOrder, NewRecipe, NewUser, Notification, Order, OrderItem, OrderStatus,
    Recipe, RecipeQuery, User, UserType, VehicleType, MAX_MESSAGE_LENGTH,
};
pub use error::DomainError;
pub use traits::{
    CourierRepository, CustomerRepository, DeliveryRepository, MessageRepository,
    NotificationRepository, OrderRepository, Page, RecipeRepository, RepoResult, SessionData,
    SessionStore, UserQuery, UserRepository,
};
