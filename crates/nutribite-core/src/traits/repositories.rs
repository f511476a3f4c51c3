//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Conversation, Courier, Customer, Delivery, DeliveryStatus, Message, NewNotification,
    NewOrder, NewRecipe, NewUser, Notification, Order, OrderStatus, Recipe, RecipeQuery, User,
    VehicleType,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 20, offset: 0 }
    }
}

// ============================================================================
// User Repository
// ============================================================================

/// Filters for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Compared case-insensitively against the status column
    pub status: Option<String>,
    pub page: Page,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by phone number
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Update profile fields (name, phone)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// List users, newest first
    async fn list(&self, query: &UserQuery) -> RepoResult<Vec<User>>;

    /// Count users matching the status filter
    async fn count(&self, status: Option<&str>) -> RepoResult<i64>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Flip `status` to `banned` unless it already is.
    ///
    /// Returns `true` when this call performed the transition and `false`
    /// when the row was already banned (or concurrently flipped).
    async fn mark_banned_if_unflipped(&self, id: i64) -> RepoResult<bool>;

    /// Ban right away: status, `banned_at`, and reason
    async fn ban_now(&self, id: i64, reason: Option<&str>) -> RepoResult<()>;

    /// Record a future ban activation time
    async fn schedule_ban(
        &self,
        id: i64,
        effective_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> RepoResult<()>;

    /// Reactivate the account and clear every ban field
    async fn unban(&self, id: i64) -> RepoResult<()>;

    /// Best-effort presence stamp
    async fn touch_last_seen(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Customer Repository
// ============================================================================

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find the profile of a customer user
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Option<Customer>>;

    /// Insert or replace the profile
    async fn upsert(&self, customer: &Customer) -> RepoResult<Customer>;
}

// ============================================================================
// Courier Repository
// ============================================================================

#[async_trait]
pub trait CourierRepository: Send + Sync {
    /// Find courier by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Courier>>;

    /// Find the courier row attached to a user
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Option<Courier>>;

    /// List all couriers
    async fn list(&self) -> RepoResult<Vec<Courier>>;

    /// Create the courier user and its courier row in one transaction
    async fn create_with_user(
        &self,
        user: &NewUser,
        password_hash: &str,
        vehicle_type: VehicleType,
    ) -> RepoResult<(User, Courier)>;

    /// Toggle availability
    async fn set_available(&self, id: i64, available: bool) -> RepoResult<()>;

    /// Release open deliveries, then delete the courier and its user, atomically
    async fn delete_with_user(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Order Repository
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find order (with items) by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>>;

    /// Orders of one customer, newest first
    async fn list_by_customer(&self, customer_id: i64, page: Page) -> RepoResult<Vec<Order>>;

    /// All orders, optionally filtered by status, newest first
    async fn list(&self, status: Option<OrderStatus>, page: Page) -> RepoResult<Vec<Order>>;

    /// Insert order and items in one transaction
    async fn create(&self, order: &NewOrder) -> RepoResult<Order>;

    /// Move `id` from `from` to `to`; `false` if the order was no longer in `from`
    async fn transition(&self, id: i64, from: OrderStatus, to: OrderStatus) -> RepoResult<bool>;
}

// ============================================================================
// Delivery Repository
// ============================================================================

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Find delivery by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Delivery>>;

    /// Find the delivery of an order
    async fn find_by_order(&self, order_id: i64) -> RepoResult<Option<Delivery>>;

    /// Deliveries of one courier, newest first
    async fn list_by_courier(&self, courier_id: i64) -> RepoResult<Vec<Delivery>>;

    /// Create an `assigned` delivery
    async fn assign(&self, order_id: i64, courier_id: i64) -> RepoResult<Delivery>;

    /// Move `id` from `from` to `to`; `false` if it was no longer in `from`
    async fn transition(
        &self,
        id: i64,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Recipe Repository
// ============================================================================

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find recipe by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Recipe>>;

    /// Fetch several recipes at once; missing IDs are skipped
    async fn find_many(&self, ids: &[i64]) -> RepoResult<Vec<Recipe>>;

    /// Filtered listing
    async fn search(&self, query: &RecipeQuery) -> RepoResult<Vec<Recipe>>;

    /// Create a new recipe
    async fn create(&self, recipe: &NewRecipe) -> RepoResult<Recipe>;

    /// Update an existing recipe
    async fn update(&self, recipe: &Recipe) -> RepoResult<()>;

    /// Delete a recipe
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Notifications of a user, newest first
    async fn list_for_user(
        &self,
        user_id: i64,
        unread_only: bool,
        page: Page,
    ) -> RepoResult<Vec<Notification>>;

    /// Create a notification
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// Mark one notification of `user_id` as read
    async fn mark_read(&self, id: i64, user_id: i64) -> RepoResult<()>;

    /// Mark every notification of `user_id` as read, returning how many changed
    async fn mark_all_read(&self, user_id: i64) -> RepoResult<u64>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a direct message
    async fn create(&self, sender_id: i64, recipient_id: i64, body: &str) -> RepoResult<Message>;

    /// Messages exchanged between two users, newest first
    async fn list_between(&self, user_id: i64, peer_id: i64, page: Page)
        -> RepoResult<Vec<Message>>;

    /// Latest message per peer for `user_id`
    async fn conversations(&self, user_id: i64) -> RepoResult<Vec<Conversation>>;

    /// Mark messages from `peer_id` to `user_id` as read
    async fn mark_read(&self, user_id: i64, peer_id: i64) -> RepoResult<u64>;
}
