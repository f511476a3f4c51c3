//! Order entity <-> model mapper

use std::collections::HashMap;

use nutribite_core::entities::{Order, OrderItem, OrderStatus};
use nutribite_core::error::DomainError;

use crate::models::{OrderItemModel, OrderModel};

impl From<OrderItemModel> for OrderItem {
    fn from(model: OrderItemModel) -> Self {
        OrderItem {
            recipe_id: model.recipe_id,
            quantity: model.quantity,
            unit_price_cents: model.unit_price_cents,
        }
    }
}

/// Assemble an order from its row and item rows
pub fn order_from_parts(model: OrderModel, items: Vec<OrderItemModel>) -> Result<Order, DomainError> {
    let status: OrderStatus = model.status.parse().map_err(DomainError::DatabaseError)?;

    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        status,
        items: items.into_iter().map(OrderItem::from).collect(),
        total_cents: model.total_cents,
        delivery_address: model.delivery_address,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Attach item rows to their orders, keeping the order of `orders`
pub fn orders_with_items(
    orders: Vec<OrderModel>,
    items: Vec<OrderItemModel>,
) -> Result<Vec<Order>, DomainError> {
    let mut grouped: HashMap<i64, Vec<OrderItemModel>> = HashMap::new();
    for item in items {
        grouped.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = grouped.remove(&order.id).unwrap_or_default();
            order_from_parts(order, items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order_row(id: i64, status: &str) -> OrderModel {
        let now = Utc::now();
        OrderModel {
            id,
            customer_id: 1,
            status: status.to_string(),
            total_cents: 0,
            delivery_address: "1 Main St".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn item_row(order_id: i64, recipe_id: i64) -> OrderItemModel {
        OrderItemModel {
            order_id,
            recipe_id,
            quantity: 1,
            unit_price_cents: 500,
        }
    }

    #[test]
    fn test_items_are_grouped_per_order() {
        let orders = orders_with_items(
            vec![order_row(2, "pending"), order_row(1, "delivered")],
            vec![item_row(1, 10), item_row(2, 20), item_row(2, 21)],
        )
        .unwrap();

        assert_eq!(orders[0].id, 2);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[1].items[0].recipe_id, 10);
        assert_eq!(orders[1].status, OrderStatus::Delivered);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(order_from_parts(order_row(1, "lost"), Vec::new()).is_err());
    }
}
