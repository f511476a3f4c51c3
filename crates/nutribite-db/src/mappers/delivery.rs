//! Delivery entity <-> model mapper

use nutribite_core::entities::{Delivery, DeliveryStatus};
use nutribite_core::error::DomainError;

use crate::models::DeliveryModel;

impl TryFrom<DeliveryModel> for Delivery {
    type Error = DomainError;

    fn try_from(model: DeliveryModel) -> Result<Self, Self::Error> {
        let status: DeliveryStatus = model.status.parse().map_err(DomainError::DatabaseError)?;

        Ok(Delivery {
            id: model.id,
            order_id: model.order_id,
            courier_id: model.courier_id,
            status,
            assigned_at: model.assigned_at,
            picked_up_at: model.picked_up_at,
            delivered_at: model.delivered_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
