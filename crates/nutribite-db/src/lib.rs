//! # nutribite-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `nutribite-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nutribite_db::pool::{create_pool, DatabaseConfig};
//! use nutribite_db::repositories::PgUserRepository;
//! use nutribite_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     let users = PgUserRepository::new(pool);
//!     let flipped = users.mark_banned_if_unflipped(42).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCourierRepository, PgCustomerRepository, PgDeliveryRepository, PgMessageRepository,
    PgNotificationRepository, PgOrderRepository, PgRecipeRepository, PgUserRepository,
};
