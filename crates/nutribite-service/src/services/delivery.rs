//! Delivery service
//!
//! Admins hand confirmed orders to couriers; couriers walk their deliveries
//! through pickup and drop-off, and the order follows along.

use nutribite_core::entities::{DeliveryStatus, User};
use nutribite_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{AssignDeliveryRequest, DeliveryResponse};

use super::context::ServiceContext;
use super::courier::CourierService;
use super::error::ServiceResult;
use super::order::OrderService;

pub struct DeliveryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeliveryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assign a courier to a confirmed or preparing order
    #[instrument(skip(self, request), fields(order_id = request.order_id, courier_id = request.courier_id))]
    pub async fn assign(&self, request: AssignDeliveryRequest) -> ServiceResult<DeliveryResponse> {
        let order = self
            .ctx
            .order_repo()
            .find_by_id(request.order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(request.order_id))?;
        if !order.status.accepts_courier() {
            return Err(DomainError::OrderNotAssignable(order.status).into());
        }

        self.ctx
            .courier_repo()
            .find_by_id(request.courier_id)
            .await?
            .ok_or(DomainError::CourierNotFound(request.courier_id))?;

        let delivery = self
            .ctx
            .delivery_repo()
            .assign(request.order_id, request.courier_id)
            .await?;

        info!(delivery_id = delivery.id, "Courier assigned");
        Ok(DeliveryResponse::from(delivery))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn list_own(&self, user: &User) -> ServiceResult<Vec<DeliveryResponse>> {
        let courier = CourierService::new(self.ctx).courier_for(user).await?;
        let deliveries = self.ctx.delivery_repo().list_by_courier(courier.id).await?;
        Ok(deliveries.into_iter().map(DeliveryResponse::from).collect())
    }

    /// Courier status update; other couriers' deliveries are reported missing
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn update_status(
        &self,
        user: &User,
        delivery_id: i64,
        to: DeliveryStatus,
    ) -> ServiceResult<DeliveryResponse> {
        let courier = CourierService::new(self.ctx).courier_for(user).await?;
        let mut delivery = self
            .ctx
            .delivery_repo()
            .find_by_id(delivery_id)
            .await?
            .filter(|d| d.courier_id == Some(courier.id))
            .ok_or(DomainError::DeliveryNotFound(delivery_id))?;

        let from = delivery.status;
        if !from.can_transition_to(to)
            || !self.ctx.delivery_repo().transition(delivery_id, from, to).await?
        {
            return Err(DomainError::InvalidDeliveryTransition { from, to }.into());
        }
        delivery.status = to;
        delivery.updated_at = chrono::Utc::now();
        info!(delivery_id, %from, %to, "Delivery status changed");

        if let Some(order_status) = to.implied_order_status() {
            OrderService::new(self.ctx)
                .follow_delivery(delivery.order_id, order_status)
                .await;
        }

        Ok(DeliveryResponse::from(delivery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        sample_courier, sample_order, sample_user, test_context_builder,
        InMemoryCourierRepository, InMemoryDeliveryRepository, InMemoryNotificationRepository,
        InMemoryOrderRepository, InMemorySessionStore, InMemoryUserRepository,
    };
    use crate::services::ServiceError;
    use nutribite_core::{OrderStatus, UserType};
    use std::sync::Arc;

    const CUSTOMER: i64 = 1;
    const ORDER: i64 = 10;

    struct Fixture {
        ctx: ServiceContext,
        orders: Arc<InMemoryOrderRepository>,
        deliveries: Arc<InMemoryDeliveryRepository>,
        notifications: Arc<InMemoryNotificationRepository>,
    }

    /// Couriers 1 and 2 belong to users 101 and 102
    fn setup(order_status: OrderStatus) -> Fixture {
        let orders = Arc::new(InMemoryOrderRepository::new());
        let deliveries = Arc::new(InMemoryDeliveryRepository::new());
        let couriers = Arc::new(InMemoryCourierRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());

        orders.insert(sample_order(ORDER, CUSTOMER, order_status));
        couriers.insert(sample_courier(1, 101));
        couriers.insert(sample_courier(2, 102));

        let ctx = test_context_builder(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemorySessionStore::new()),
        )
        .order_repo(orders.clone())
        .delivery_repo(deliveries.clone())
        .courier_repo(couriers)
        .notification_repo(notifications.clone())
        .build()
        .unwrap();

        Fixture {
            ctx,
            orders,
            deliveries,
            notifications,
        }
    }

    fn courier_user(id: i64) -> User {
        let mut user = sample_user(id);
        user.user_type = UserType::Courier;
        user
    }

    fn assignment(courier_id: i64) -> AssignDeliveryRequest {
        AssignDeliveryRequest {
            order_id: ORDER,
            courier_id,
        }
    }

    #[tokio::test]
    async fn test_confirmed_order_follows_delivery_to_the_end() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);
        let courier = courier_user(101);

        let delivery = service.assign(assignment(1)).await.unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Assigned);
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::Confirmed));

        service
            .update_status(&courier, delivery.id, DeliveryStatus::PickedUp)
            .await
            .unwrap();
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::OutForDelivery));

        service
            .update_status(&courier, delivery.id, DeliveryStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::Delivered));
        assert!(fx.deliveries.get(delivery.id).unwrap().delivered_at.is_some());

        // one notice per step the order took
        let bodies = fx.notifications.bodies_for(CUSTOMER);
        assert_eq!(bodies.len(), 3);
        assert!(bodies[0].ends_with("now preparing."));
        assert!(bodies[2].ends_with("now delivered."));
    }

    #[tokio::test]
    async fn test_preparing_order_moves_one_step_on_pickup() {
        let fx = setup(OrderStatus::Preparing);
        let service = DeliveryService::new(&fx.ctx);

        let delivery = service.assign(assignment(2)).await.unwrap();
        service
            .update_status(&courier_user(102), delivery.id, DeliveryStatus::PickedUp)
            .await
            .unwrap();
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::OutForDelivery));
        assert_eq!(fx.notifications.bodies_for(CUSTOMER).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delivery_leaves_order_alone() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);

        let delivery = service.assign(assignment(1)).await.unwrap();
        service
            .update_status(&courier_user(101), delivery.id, DeliveryStatus::Failed)
            .await
            .unwrap();
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::Confirmed));
        assert!(fx.notifications.bodies_for(CUSTOMER).is_empty());
    }

    #[tokio::test]
    async fn test_assign_rejects_orders_not_ready() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let fx = setup(status);
            let err = DeliveryService::new(&fx.ctx)
                .assign(assignment(1))
                .await
                .unwrap_err();
            assert!(
                matches!(err, ServiceError::Domain(DomainError::OrderNotAssignable(s)) if s == status),
                "{status}: {err}"
            );
            assert_eq!(err.status_code(), 409);
        }
    }

    #[tokio::test]
    async fn test_assign_unknown_courier_or_order() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);

        let err = service.assign(assignment(99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::CourierNotFound(99))));

        let err = service
            .assign(AssignDeliveryRequest {
                order_id: 404,
                courier_id: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::OrderNotFound(404))));
    }

    #[tokio::test]
    async fn test_second_assignment_conflicts() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);

        service.assign(assignment(1)).await.unwrap();
        let err = service.assign(assignment(2)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::DeliveryAlreadyAssigned(ORDER))
        ));
    }

    #[tokio::test]
    async fn test_other_couriers_delivery_is_missing() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);
        let delivery = service.assign(assignment(1)).await.unwrap();

        let err = service
            .update_status(&courier_user(102), delivery.id, DeliveryStatus::PickedUp)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::DeliveryNotFound(_))));
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            fx.deliveries.get(delivery.id).unwrap().status,
            DeliveryStatus::Assigned
        );
        assert!(service.list_own(&courier_user(102)).await.unwrap().is_empty());
        assert_eq!(service.list_own(&courier_user(101)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_illegal_delivery_step_and_non_courier() {
        let fx = setup(OrderStatus::Confirmed);
        let service = DeliveryService::new(&fx.ctx);
        let delivery = service.assign(assignment(1)).await.unwrap();

        let err = service
            .update_status(&courier_user(101), delivery.id, DeliveryStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::InvalidDeliveryTransition { .. })
        ));
        assert_eq!(fx.orders.status(ORDER), Some(OrderStatus::Confirmed));

        let err = service.list_own(&sample_user(101)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::CourierRequired)));
    }
}
