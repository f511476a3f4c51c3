//! Order service
//!
//! Customers place, read and cancel their own orders; admins move orders
//! through the status lifecycle. Prices are taken from the recipes at order
//! time, never from the client.

use std::collections::HashMap;

use nutribite_core::entities::{NewOrder, Order, OrderItem, OrderStatus, Recipe};
use nutribite_core::DomainError;
use tracing::{debug, info, instrument, warn};

use crate::dto::{CreateOrderRequest, OrderResponse, PageRequest, PaginatedResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

const MAX_QUANTITY: i32 = 50;

pub struct OrderService<'a> {
    ctx: &'a ServiceContext,
}

/// Price each requested line from the catalogue
fn price_items(
    request: &CreateOrderRequest,
    recipes: &[Recipe],
) -> Result<Vec<OrderItem>, DomainError> {
    if request.items.is_empty() {
        return Err(DomainError::EmptyOrder);
    }
    let prices: HashMap<i64, i64> = recipes.iter().map(|r| (r.id, r.price_cents)).collect();

    request
        .items
        .iter()
        .map(|item| {
            if !(1..=MAX_QUANTITY).contains(&item.quantity) {
                return Err(DomainError::ValidationError(format!(
                    "Quantity must be 1-{MAX_QUANTITY}"
                )));
            }
            let unit_price_cents = *prices
                .get(&item.recipe_id)
                .ok_or(DomainError::RecipeNotFound(item.recipe_id))?;
            Ok(OrderItem {
                recipe_id: item.recipe_id,
                quantity: item.quantity,
                unit_price_cents,
            })
        })
        .collect()
}

impl<'a> OrderService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create(
        &self,
        customer_id: i64,
        request: CreateOrderRequest,
    ) -> ServiceResult<OrderResponse> {
        let mut ids: Vec<i64> = request.items.iter().map(|i| i.recipe_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let recipes = self.ctx.recipe_repo().find_many(&ids).await?;

        let items = price_items(&request, &recipes)?;
        let delivery_address = request.delivery_address.trim().to_string();
        if delivery_address.is_empty() {
            return Err(ServiceError::validation("Delivery address is required"));
        }

        let new_order = NewOrder {
            customer_id,
            items,
            delivery_address,
            notes: request.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        };
        let order = self.ctx.order_repo().create(&new_order).await?;

        info!(order_id = order.id, total_cents = order.total_cents, "Order placed");
        Ok(OrderResponse::from(order))
    }

    #[instrument(skip(self))]
    pub async fn list_own(
        &self,
        customer_id: i64,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<OrderResponse>> {
        let orders = self
            .ctx
            .order_repo()
            .list_by_customer(customer_id, page.to_page())
            .await?;
        Ok(PaginatedResponse::new(
            orders.into_iter().map(OrderResponse::from).collect(),
            page.page,
            page.per_page,
            None,
        ))
    }

    /// Orders of other customers are reported as missing
    #[instrument(skip(self))]
    pub async fn get_own(&self, customer_id: i64, order_id: i64) -> ServiceResult<OrderResponse> {
        Ok(OrderResponse::from(self.load_own(customer_id, order_id).await?))
    }

    /// Customers may cancel only while the order is pending
    #[instrument(skip(self))]
    pub async fn cancel(&self, customer_id: i64, order_id: i64) -> ServiceResult<OrderResponse> {
        let order = self.load_own(customer_id, order_id).await?;
        if order.status != OrderStatus::Pending {
            return Err(DomainError::InvalidOrderTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            }
            .into());
        }
        self.move_order(order, OrderStatus::Cancelled).await
    }

    #[instrument(skip(self))]
    pub async fn list_all(
        &self,
        status: Option<OrderStatus>,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<OrderResponse>> {
        let orders = self.ctx.order_repo().list(status, page.to_page()).await?;
        Ok(PaginatedResponse::new(
            orders.into_iter().map(OrderResponse::from).collect(),
            page.page,
            page.per_page,
            None,
        ))
    }

    /// Admin status change along the lifecycle
    #[instrument(skip(self))]
    pub async fn update_status(&self, order_id: i64, to: OrderStatus) -> ServiceResult<OrderResponse> {
        let order = self.load(order_id).await?;
        self.move_order(order, to).await
    }

    /// Follow a delivery milestone, stepping through any statuses the order
    /// has not reached yet; skipped when `to` is not ahead of the order
    pub(crate) async fn follow_delivery(&self, order_id: i64, to: OrderStatus) {
        let mut order = match self.load(order_id).await {
            Ok(order) => order,
            Err(e) => {
                warn!(order_id, error = %e, "Order lookup after delivery update failed");
                return;
            }
        };
        let Some(path) = order.status.forward_path_to(to) else {
            debug!(order_id, from = %order.status, %to, "Order not behind delivery; left as is");
            return;
        };
        for step in path {
            if let Err(e) = self.step(&mut order, step).await {
                warn!(order_id, error = %e, "Order did not follow delivery status");
                return;
            }
        }
    }

    async fn load(&self, order_id: i64) -> ServiceResult<Order> {
        self.ctx
            .order_repo()
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id).into())
    }

    async fn load_own(&self, customer_id: i64, order_id: i64) -> ServiceResult<Order> {
        let order = self.load(order_id).await?;
        if order.customer_id != customer_id {
            return Err(DomainError::OrderNotFound(order_id).into());
        }
        Ok(order)
    }

    async fn move_order(&self, mut order: Order, to: OrderStatus) -> ServiceResult<OrderResponse> {
        self.step(&mut order, to).await?;
        Ok(OrderResponse::from(order))
    }

    async fn step(&self, order: &mut Order, to: OrderStatus) -> ServiceResult<()> {
        let from = order.status;
        if !from.can_transition_to(to) {
            return Err(DomainError::InvalidOrderTransition { from, to }.into());
        }
        // a concurrent change wins; report it as the same conflict
        if !self.ctx.order_repo().transition(order.id, from, to).await? {
            return Err(DomainError::InvalidOrderTransition { from, to }.into());
        }

        order.status = to;
        order.updated_at = chrono::Utc::now();
        info!(order_id = order.id, %from, %to, "Order status changed");

        NotificationService::new(self.ctx)
            .notify_order_status(order)
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::OrderItemRequest;
    use chrono::Utc;

    fn recipe(id: i64, price_cents: i64) -> Recipe {
        let now = Utc::now();
        Recipe {
            id,
            title: format!("Recipe {id}"),
            description: None,
            ingredients: vec![],
            calories: None,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            price_cents,
            tags: vec![],
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn request(items: &[(i64, i32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            items: items
                .iter()
                .map(|&(recipe_id, quantity)| OrderItemRequest {
                    recipe_id,
                    quantity,
                })
                .collect(),
            delivery_address: "1 Main St".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_price_items_uses_catalogue_prices() {
        let items = price_items(&request(&[(1, 2), (2, 1)]), &[recipe(1, 500), recipe(2, 1200)])
            .unwrap();
        assert_eq!(items[0].unit_price_cents, 500);
        let total: i64 = items.iter().map(OrderItem::line_total_cents).sum();
        assert_eq!(total, 2200);
    }

    #[test]
    fn test_price_items_rejects_unknown_recipe() {
        let err = price_items(&request(&[(9, 1)]), &[recipe(1, 500)]).unwrap_err();
        assert!(matches!(err, DomainError::RecipeNotFound(9)));
    }

    #[test]
    fn test_price_items_rejects_bad_quantities() {
        assert!(matches!(
            price_items(&request(&[]), &[]).unwrap_err(),
            DomainError::EmptyOrder
        ));
        assert!(price_items(&request(&[(1, 0)]), &[recipe(1, 500)]).is_err());
        assert!(price_items(&request(&[(1, 51)]), &[recipe(1, 500)]).is_err());
    }
}
