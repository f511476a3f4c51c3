//! PostgreSQL implementation of CourierRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use nutribite_core::entities::{Courier, NewUser, User, UserType, VehicleType};
use nutribite_core::error::DomainError;
use nutribite_core::traits::{CourierRepository, RepoResult};

use crate::models::{CourierModel, UserModel};

use super::error::{map_db_error, map_user_unique_violation};
use super::user::user_columns;

const COURIER_COLUMNS: &str = "id, user_id, vehicle_type, available, created_at, updated_at";

/// PostgreSQL implementation of CourierRepository
#[derive(Clone)]
pub struct PgCourierRepository {
    pool: PgPool,
}

impl PgCourierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourierRepository for PgCourierRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Courier>> {
        sqlx::query_as::<_, CourierModel>(&format!(
            "SELECT {COURIER_COLUMNS} FROM couriers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Courier::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Option<Courier>> {
        sqlx::query_as::<_, CourierModel>(&format!(
            "SELECT {COURIER_COLUMNS} FROM couriers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Courier::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Courier>> {
        let rows = sqlx::query_as::<_, CourierModel>(&format!(
            "SELECT {COURIER_COLUMNS} FROM couriers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Courier::try_from).collect()
    }

    #[instrument(skip(self, user, password_hash), fields(email = %user.email))]
    async fn create_with_user(
        &self,
        user: &NewUser,
        password_hash: &str,
        vehicle_type: VehicleType,
    ) -> RepoResult<(User, Courier)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let user_row = sqlx::query_as::<_, UserModel>(concat!(
            r"
            INSERT INTO users (name, email, phone, password_hash, user_type, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING ",
            user_columns!()
        ))
        .bind(&user.name)
        .bind(user.email.trim())
        .bind(&user.phone)
        .bind(password_hash)
        .bind(UserType::Courier.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_unique_violation)?;

        let courier_row = sqlx::query_as::<_, CourierModel>(&format!(
            "INSERT INTO couriers (user_id, vehicle_type) VALUES ($1, $2) RETURNING {COURIER_COLUMNS}"
        ))
        .bind(user_row.id)
        .bind(vehicle_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((User::try_from(user_row)?, Courier::try_from(courier_row)?))
    }

    #[instrument(skip(self))]
    async fn set_available(&self, id: i64, available: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE couriers SET available = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id)
        .bind(available)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CourierNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_with_user(&self, id: i64) -> RepoResult<()> {
        // Dropping `tx` without commit rolls every step back.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM couriers WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::CourierNotFound(id))?;

        let released = sqlx::query(
            r"
            UPDATE deliveries
            SET courier_id = NULL, status = 'pending', assigned_at = NULL,
                picked_up_at = NULL, updated_at = NOW()
            WHERE courier_id = $1 AND status IN ('assigned', 'picked_up')
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        sqlx::query("DELETE FROM couriers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(courier_id = id, user_id, released, "Courier deleted");
        Ok(())
    }
}
