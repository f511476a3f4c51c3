//! Notification entity <-> model mapper

use nutribite_core::entities::Notification;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            body: model.body,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}
