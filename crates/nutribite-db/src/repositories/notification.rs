//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{NewNotification, Notification};
use nutribite_core::error::DomainError;
use nutribite_core::traits::{NotificationRepository, Page, RepoResult};

use crate::models::NotificationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: i64,
        unread_only: bool,
        page: Page,
    ) -> RepoResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, user_id, title, body, read_at, created_at
            FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR read_at IS NULL)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self, notification), fields(user_id = notification.user_id))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let row = sqlx::query_as::<_, NotificationModel>(
            r"
            INSERT INTO notifications (user_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, body, read_at, created_at
            ",
        )
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.body)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Notification::from(row))
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: i64, user_id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET read_at = NOW() WHERE user_id = $1 AND read_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
