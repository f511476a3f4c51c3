//! PostgreSQL implementation of OrderRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nutribite_core::entities::{NewOrder, Order, OrderStatus};
use nutribite_core::traits::{OrderRepository, Page, RepoResult};

use crate::mappers::{order_from_parts, orders_with_items};
use crate::models::{OrderItemModel, OrderModel};

use super::error::map_db_error;

const ORDER_COLUMNS: &str =
    "id, customer_id, status, total_cents, delivery_address, notes, created_at, updated_at";

/// PostgreSQL implementation of OrderRepository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for(&self, order_ids: &[i64]) -> RepoResult<Vec<OrderItemModel>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, OrderItemModel>(
            r"
            SELECT order_id, recipe_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn hydrate(&self, orders: Vec<OrderModel>) -> RepoResult<Vec<Order>> {
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let items = self.items_for(&ids).await?;
        orders_with_items(orders, items)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderModel>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for(&[id]).await?;
        order_from_parts(row, items).map(Some)
    }

    #[instrument(skip(self))]
    async fn list_by_customer(&self, customer_id: i64, page: Page) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderModel>(&format!(
            r"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE customer_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(customer_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.hydrate(rows).await
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<OrderStatus>, page: Page) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderModel>(&format!(
            r"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(status.map(|s| s.as_str()))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.hydrate(rows).await
    }

    #[instrument(skip(self, order), fields(customer_id = order.customer_id, items = order.items.len()))]
    async fn create(&self, order: &NewOrder) -> RepoResult<Order> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row = sqlx::query_as::<_, OrderModel>(&format!(
            r"
            INSERT INTO orders (customer_id, status, total_cents, delivery_address, notes)
            VALUES ($1, 'pending', $2, $3, $4)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(order.customer_id)
        .bind(order.total_cents())
        .bind(&order.delivery_address)
        .bind(&order.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let item_row = sqlx::query_as::<_, OrderItemModel>(
                r"
                INSERT INTO order_items (order_id, recipe_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4)
                RETURNING order_id, recipe_id, quantity, unit_price_cents
                ",
            )
            .bind(row.id)
            .bind(item.recipe_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;
            items.push(item_row);
        }

        tx.commit().await.map_err(map_db_error)?;

        order_from_parts(row, items)
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: i64, from: OrderStatus, to: OrderStatus) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE orders SET status = $3, updated_at = NOW()
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
