//! Customer entity <-> model mapper

use nutribite_core::entities::Customer;

use crate::models::CustomerModel;

impl From<CustomerModel> for Customer {
    fn from(model: CustomerModel) -> Self {
        Customer {
            user_id: model.user_id,
            address: model.address,
            city: model.city,
            dietary_preferences: model.dietary_preferences,
            allergies: model.allergies,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
