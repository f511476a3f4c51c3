//! PostgreSQL implementation of DeliveryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{Delivery, DeliveryStatus};
use nutribite_core::error::DomainError;
use nutribite_core::traits::{DeliveryRepository, RepoResult};

use crate::models::DeliveryModel;

use super::error::map_db_error;

const DELIVERY_COLUMNS: &str = "id, order_id, courier_id, status, assigned_at, picked_up_at, \
                                delivered_at, created_at, updated_at";

/// PostgreSQL implementation of DeliveryRepository
#[derive(Clone)]
pub struct PgDeliveryRepository {
    pool: PgPool,
}

impl PgDeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryRepository for PgDeliveryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Delivery>> {
        sqlx::query_as::<_, DeliveryModel>(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Delivery::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_order(&self, order_id: i64) -> RepoResult<Option<Delivery>> {
        sqlx::query_as::<_, DeliveryModel>(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Delivery::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_courier(&self, courier_id: i64) -> RepoResult<Vec<Delivery>> {
        let rows = sqlx::query_as::<_, DeliveryModel>(&format!(
            r"
            SELECT {DELIVERY_COLUMNS} FROM deliveries
            WHERE courier_id = $1
            ORDER BY created_at DESC, id DESC
            "
        ))
        .bind(courier_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Delivery::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn assign(&self, order_id: i64, courier_id: i64) -> RepoResult<Delivery> {
        // A delivery released back to `pending` may be picked up by a new courier;
        // any other existing delivery blocks the assignment.
        let row = sqlx::query_as::<_, DeliveryModel>(&format!(
            r"
            INSERT INTO deliveries (order_id, courier_id, status, assigned_at)
            VALUES ($1, $2, 'assigned', NOW())
            ON CONFLICT (order_id) DO UPDATE
            SET courier_id = EXCLUDED.courier_id,
                status = 'assigned',
                assigned_at = NOW(),
                updated_at = NOW()
            WHERE deliveries.status = 'pending'
            RETURNING {DELIVERY_COLUMNS}
            "
        ))
        .bind(order_id)
        .bind(courier_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::DeliveryAlreadyAssigned(order_id))?;

        Delivery::try_from(row)
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        id: i64,
        from: DeliveryStatus,
        to: DeliveryStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE deliveries
            SET status = $3,
                picked_up_at = CASE WHEN $3 = 'picked_up' THEN NOW() ELSE picked_up_at END,
                delivered_at = CASE WHEN $3 = 'delivered' THEN NOW() ELSE delivered_at END,
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            ",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
