//! Notification service

use nutribite_core::entities::NewNotification;
use nutribite_core::Order;
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    CreateNotificationRequest, NotificationResponse, PageRequest, PaginatedResponse,
    UpdatedCountResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: i64,
        unread_only: bool,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .list_for_user(user_id, unread_only, page.to_page())
            .await?;
        Ok(PaginatedResponse::new(
            notifications
                .into_iter()
                .map(NotificationResponse::from)
                .collect(),
            page.page,
            page.per_page,
            None,
        ))
    }

    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> ServiceResult<()> {
        self.ctx
            .notification_repo()
            .mark_read(notification_id, user_id)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: i64) -> ServiceResult<UpdatedCountResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(user_id).await?;
        Ok(UpdatedCountResponse { updated })
    }

    /// Admin-authored notification
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    pub async fn create(
        &self,
        request: CreateNotificationRequest,
    ) -> ServiceResult<NotificationResponse> {
        if self
            .ctx
            .user_repo()
            .find_by_id(request.user_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("User", request.user_id.to_string()));
        }

        let notification = self
            .ctx
            .notification_repo()
            .create(&NewNotification {
                user_id: request.user_id,
                title: request.title.trim().to_string(),
                body: request.body.trim().to_string(),
            })
            .await?;

        info!(notification_id = notification.id, "Notification created");
        Ok(NotificationResponse::from(notification))
    }

    /// Tell the customer their order moved; failures are logged and swallowed
    pub async fn notify_order_status(&self, order: &Order) {
        let notification = order_status_notification(order);
        match self.ctx.notification_repo().create(&notification).await {
            Ok(n) => debug!(notification_id = n.id, order_id = order.id, "Order notification sent"),
            Err(e) => warn!(order_id = order.id, error = %e, "Order notification failed"),
        }
    }
}

fn order_status_notification(order: &Order) -> NewNotification {
    let status = order.status.as_str().replace('_', " ");
    NewNotification {
        user_id: order.customer_id,
        title: format!("Order #{} update", order.id),
        body: format!("Your order #{} is now {status}.", order.id),
    }
}
