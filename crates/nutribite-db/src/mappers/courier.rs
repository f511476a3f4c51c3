//! Courier entity <-> model mapper

use nutribite_core::entities::{Courier, VehicleType};
use nutribite_core::error::DomainError;

use crate::models::CourierModel;

impl TryFrom<CourierModel> for Courier {
    type Error = DomainError;

    fn try_from(model: CourierModel) -> Result<Self, Self::Error> {
        let vehicle_type: VehicleType = model
            .vehicle_type
            .parse()
            .map_err(DomainError::DatabaseError)?;

        Ok(Courier {
            id: model.id,
            user_id: model.user_id,
            vehicle_type,
            available: model.available,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
