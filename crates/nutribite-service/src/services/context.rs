//! Service context - dependency container for services
//!
//! Holds the pools, every repository, the session store and the access
//! settings. Repositories are trait objects so tests can swap in fakes.

use std::sync::Arc;

use nutribite_cache::SharedRedisPool;
use nutribite_common::{AccessConfig, PasswordService};
use nutribite_core::traits::{
    CourierRepository, CustomerRepository, DeliveryRepository, MessageRepository,
    NotificationRepository, OrderRepository, RecipeRepository, SessionStore, UserRepository,
};
use nutribite_db::PgPool;

use super::access::{AccessGuard, BanReconciler};
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: SharedRedisPool,

    user_repo: Arc<dyn UserRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    courier_repo: Arc<dyn CourierRepository>,
    order_repo: Arc<dyn OrderRepository>,
    delivery_repo: Arc<dyn DeliveryRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    message_repo: Arc<dyn MessageRepository>,

    session_store: Arc<dyn SessionStore>,

    passwords: PasswordService,
    access_guard: AccessGuard,
}

impl ServiceContext {
    // === Pools (readiness probes) ===

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn customer_repo(&self) -> &dyn CustomerRepository {
        self.customer_repo.as_ref()
    }

    pub fn courier_repo(&self) -> &dyn CourierRepository {
        self.courier_repo.as_ref()
    }

    pub fn order_repo(&self) -> &dyn OrderRepository {
        self.order_repo.as_ref()
    }

    pub fn delivery_repo(&self) -> &dyn DeliveryRepository {
        self.delivery_repo.as_ref()
    }

    pub fn recipe_repo(&self) -> &dyn RecipeRepository {
        self.recipe_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    // === Sessions and access ===

    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    /// The ban check shared by every call site
    pub fn access_guard(&self) -> &AccessGuard {
        &self.access_guard
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("access_guard", &self.access_guard)
            .finish()
    }
}

/// Builder for [`ServiceContext`]
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    customer_repo: Option<Arc<dyn CustomerRepository>>,
    courier_repo: Option<Arc<dyn CourierRepository>>,
    order_repo: Option<Arc<dyn OrderRepository>>,
    delivery_repo: Option<Arc<dyn DeliveryRepository>>,
    recipe_repo: Option<Arc<dyn RecipeRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    access: AccessConfig,
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn customer_repo(mut self, repo: Arc<dyn CustomerRepository>) -> Self {
        self.customer_repo = Some(repo);
        self
    }

    pub fn courier_repo(mut self, repo: Arc<dyn CourierRepository>) -> Self {
        self.courier_repo = Some(repo);
        self
    }

    pub fn order_repo(mut self, repo: Arc<dyn OrderRepository>) -> Self {
        self.order_repo = Some(repo);
        self
    }

    pub fn delivery_repo(mut self, repo: Arc<dyn DeliveryRepository>) -> Self {
        self.delivery_repo = Some(repo);
        self
    }

    pub fn recipe_repo(mut self, repo: Arc<dyn RecipeRepository>) -> Self {
        self.recipe_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Presence throttle and reconcile timeout; defaults apply when unset
    pub fn access_config(mut self, access: AccessConfig) -> Self {
        self.access = access;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let user_repo = required(self.user_repo, "user_repo")?;
        let reconciler = BanReconciler::new(user_repo.clone(), self.access.ban_reconcile_timeout());
        let access_guard = AccessGuard::new(
            reconciler,
            user_repo.clone(),
            self.access.presence_touch_interval(),
        );

        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            redis_pool: required(self.redis_pool, "redis_pool")?,
            user_repo,
            customer_repo: required(self.customer_repo, "customer_repo")?,
            courier_repo: required(self.courier_repo, "courier_repo")?,
            order_repo: required(self.order_repo, "order_repo")?,
            delivery_repo: required(self.delivery_repo, "delivery_repo")?,
            recipe_repo: required(self.recipe_repo, "recipe_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            session_store: required(self.session_store, "session_store")?,
            passwords: PasswordService::new(),
            access_guard,
        })
    }
}
