//! Database connection pool management

mod migrations;
mod postgres;

pub use migrations::{migrations_dir, run_migrations, run_migrations_from};
pub use postgres::{create_lazy_pool, create_pool, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
