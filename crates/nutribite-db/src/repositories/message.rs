//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{Conversation, Message};
use nutribite_core::traits::{MessageRepository, Page, RepoResult};

use crate::models::{ConversationModel, MessageModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, body))]
    async fn create(&self, sender_id: i64, recipient_id: i64, body: &str) -> RepoResult<Message> {
        let row = sqlx::query_as::<_, MessageModel>(
            r"
            INSERT INTO messages (sender_id, recipient_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, sender_id, recipient_id, body, read_at, created_at
            ",
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(row))
    }

    #[instrument(skip(self))]
    async fn list_between(
        &self,
        user_id: i64,
        peer_id: i64,
        page: Page,
    ) -> RepoResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, sender_id, recipient_id, body, read_at, created_at
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_id)
        .bind(peer_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn conversations(&self, user_id: i64) -> RepoResult<Vec<Conversation>> {
        let rows = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT * FROM (
                SELECT DISTINCT ON (m.peer_id)
                       m.id, m.sender_id, m.recipient_id, m.body, m.read_at, m.created_at,
                       m.peer_id, u.name AS peer_name,
                       (SELECT COUNT(*) FROM messages x
                         WHERE x.sender_id = m.peer_id AND x.recipient_id = $1
                           AND x.read_at IS NULL) AS unread_count
                FROM (
                    SELECT messages.*,
                           CASE WHEN sender_id = $1 THEN recipient_id ELSE sender_id END AS peer_id
                    FROM messages
                    WHERE sender_id = $1 OR recipient_id = $1
                ) m
                JOIN users u ON u.id = m.peer_id
                ORDER BY m.peer_id, m.created_at DESC, m.id DESC
            ) latest
            ORDER BY latest.created_at DESC, latest.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, user_id: i64, peer_id: i64) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE messages SET read_at = NOW()
            WHERE recipient_id = $1 AND sender_id = $2 AND read_at IS NULL
            ",
        )
        .bind(user_id)
        .bind(peer_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
