//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in nutribite-core.
//! Each repository handles database operations for a specific domain entity.

mod courier;
mod customer;
mod delivery;
mod error;
mod message;
mod notification;
mod order;
mod recipe;
mod user;

pub use courier::PgCourierRepository;
pub use customer::PgCustomerRepository;
pub use delivery::PgDeliveryRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use order::PgOrderRepository;
pub use recipe::PgRecipeRepository;
pub use user::PgUserRepository;
