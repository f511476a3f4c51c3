//! Schema migrations

use std::path::{Path, PathBuf};

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

/// Directory holding the SQL migrations of this crate
pub fn migrations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// Apply pending migrations from `dir`
pub async fn run_migrations_from(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;
    tracing::info!(
        applied = migrator.iter().count(),
        dir = %dir.display(),
        "Database migrations up to date"
    );
    Ok(())
}

/// Apply pending migrations shipped with this crate
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    run_migrations_from(pool, &migrations_dir()).await
}
