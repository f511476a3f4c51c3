//! Ports implemented by the infrastructure crates

mod repositories;
mod session;

pub use repositories::{
    CourierRepository, CustomerRepository, DeliveryRepository, MessageRepository,
    NotificationRepository, OrderRepository, Page, RecipeRepository, RepoResult, UserQuery,
    UserRepository,
};
pub use session::{SessionData, SessionStore};
