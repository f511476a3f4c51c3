//! Domain entities - core business objects

mod courier;
mod customer;
mod delivery;
mod message;
mod notification;
mod order;
mod recipe;
mod user;

pub use courier::{Courier, VehicleType};
pub use customer::Customer;
pub use delivery::{Delivery, DeliveryStatus};
pub use message::{Conversation, Message, MAX_MESSAGE_LENGTH};
pub use notification::{NewNotification, Notification};
pub use order::{NewOrder, Order, OrderItem, OrderStatus};
pub use recipe::{NewRecipe, Recipe, RecipeQuery};
pub use user::{AccountStatus, NewUser, User, UserType};
