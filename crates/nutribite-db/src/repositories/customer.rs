//! PostgreSQL implementation of CustomerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::Customer;
use nutribite_core::traits::{CustomerRepository, RepoResult};

use crate::models::CustomerModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CustomerRepository
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Option<Customer>> {
        let result = sqlx::query_as::<_, CustomerModel>(
            r"
            SELECT user_id, address, city, dietary_preferences, allergies, created_at, updated_at
            FROM customers
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Customer::from))
    }

    #[instrument(skip(self, customer), fields(user_id = customer.user_id))]
    async fn upsert(&self, customer: &Customer) -> RepoResult<Customer> {
        let row = sqlx::query_as::<_, CustomerModel>(
            r"
            INSERT INTO customers (user_id, address, city, dietary_preferences, allergies)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET address = EXCLUDED.address,
                city = EXCLUDED.city,
                dietary_preferences = EXCLUDED.dietary_preferences,
                allergies = EXCLUDED.allergies,
                updated_at = NOW()
            RETURNING user_id, address, city, dietary_preferences, allergies, created_at, updated_at
            ",
        )
        .bind(customer.user_id)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.dietary_preferences)
        .bind(&customer.allergies)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Customer::from(row))
    }
}
