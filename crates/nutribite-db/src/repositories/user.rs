//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgQueryResult;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{NewUser, User};
use nutribite_core::error::DomainError;
use nutribite_core::traits::{RepoResult, UserQuery, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_user_unique_violation};

/// Column list shared by every user query; see `UserModel` for the text cast
macro_rules! user_columns {
    () => {
        r"id, name, email, phone, user_type, status,
          ban_effective_at::TEXT AS ban_effective_at,
          banned_at, ban_reason, last_seen, created_at, updated_at"
    };
}

pub(crate) use user_columns;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, sql: &str, value: &str) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(User::try_from)
            .transpose()
    }
}

fn ensure_found(result: &PgQueryResult, id: i64) -> RepoResult<()> {
    if result.rows_affected() == 0 {
        return Err(DomainError::UserNotFound(id));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(User::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one(
            concat!(
                "SELECT ",
                user_columns!(),
                " FROM users WHERE LOWER(email) = LOWER($1)"
            ),
            email.trim(),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        self.find_one(
            concat!("SELECT ", user_columns!(), " FROM users WHERE phone = $1"),
            phone.trim(),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserModel>(concat!(
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
        .bind(user.user_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        User::try_from(row)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, phone = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .execute(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        ensure_found(&result, user.id)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &UserQuery) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(concat!(
            "SELECT ",
            user_columns!(),
            r"
            FROM users
            WHERE ($1::TEXT IS NULL OR LOWER(status) = LOWER($1))
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(query.status.as_deref())
        .bind(query.page.limit)
        .bind(query.page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<&str>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM users
            WHERE ($1::TEXT IS NULL OR LOWER(status) = LOWER($1))
            ",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_found(&result, id)
    }

    #[instrument(skip(self))]
    async fn mark_banned_if_unflipped(&self, id: i64) -> RepoResult<bool> {
        // NULL status counts as not banned; IS DISTINCT FROM keeps those rows eligible.
        let result = sqlx::query(
            r"
            UPDATE users
            SET status = 'banned', banned_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND LOWER(status) IS DISTINCT FROM 'banned'
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn ban_now(&self, id: i64, reason: Option<&str>) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET status = 'banned',
                banned_at = NOW(),
                ban_effective_at = NOW(),
                ban_reason = $2,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_found(&result, id)
    }

    #[instrument(skip(self))]
    async fn schedule_ban(
        &self,
        id: i64,
        effective_at: DateTime<Utc>,
        reason: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET ban_effective_at = $2, ban_reason = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(effective_at)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_found(&result, id)
    }

    #[instrument(skip(self))]
    async fn unban(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET status = 'active',
                banned_at = NULL,
                ban_effective_at = NULL,
                ban_reason = NULL,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_found(&result, id)
    }

    #[instrument(skip(self))]
    async fn touch_last_seen(&self, id: i64) -> RepoResult<()> {
        sqlx::query("UPDATE users SET last_seen = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
