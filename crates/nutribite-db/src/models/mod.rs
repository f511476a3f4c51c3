//! Database models - SQLx-compatible structs for PostgreSQL tables

mod courier;
mod customer;
mod delivery;
mod message;
mod notification;
mod order;
mod recipe;
mod user;

pub use courier::CourierModel;
pub use customer::CustomerModel;
pub use delivery::DeliveryModel;
pub use message::{ConversationModel, MessageModel};
pub use notification::NotificationModel;
pub use order::{OrderItemModel, OrderModel};
pub use recipe::RecipeModel;
pub use user::UserModel;
