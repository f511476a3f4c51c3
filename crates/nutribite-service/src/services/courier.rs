//! Courier service
//!
//! Admin management of courier accounts, and the courier's own status.

use nutribite_core::entities::{Courier, NewUser, User, UserType};
use nutribite_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CourierResponse, CreateCourierRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CourierService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CourierService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<CourierResponse>> {
        let couriers = self.ctx.courier_repo().list().await?;
        Ok(couriers.into_iter().map(CourierResponse::from).collect())
    }

    /// Create the courier's login and courier row together
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateCourierRequest) -> ServiceResult<CourierResponse> {
        let password_hash = self.ctx.passwords().hash_new(&request.password)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone.map(|p| p.trim().to_string()),
            user_type: UserType::Courier,
        };
        let (user, courier) = self
            .ctx
            .courier_repo()
            .create_with_user(&new_user, &password_hash, request.vehicle_type)
            .await?;

        info!(courier_id = courier.id, user_id = user.id, "Courier created");
        Ok(CourierResponse::from(courier).with_user(&user))
    }

    /// Open deliveries go back to the pool; the courier and its login are removed
    #[instrument(skip(self))]
    pub async fn delete(&self, courier_id: i64) -> ServiceResult<()> {
        self.ctx.courier_repo().delete_with_user(courier_id).await?;
        info!(courier_id, "Courier deleted");
        Ok(())
    }

    /// The courier row of a courier user
    pub async fn courier_for(&self, user: &User) -> ServiceResult<Courier> {
        if !user.is_courier() {
            return Err(DomainError::CourierRequired.into());
        }
        self.ctx
            .courier_repo()
            .find_by_user(user.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Courier", format!("user {}", user.id)))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn me(&self, user: &User) -> ServiceResult<CourierResponse> {
        let courier = self.courier_for(user).await?;
        Ok(CourierResponse::from(courier).with_user(user))
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn set_availability(
        &self,
        user: &User,
        available: bool,
    ) -> ServiceResult<CourierResponse> {
        let mut courier = self.courier_for(user).await?;
        if courier.available != available {
            self.ctx
                .courier_repo()
                .set_available(courier.id, available)
                .await?;
            courier.available = available;
            info!(courier_id = courier.id, available, "Courier availability changed");
        }
        Ok(CourierResponse::from(courier).with_user(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        sample_user, test_context, InMemorySessionStore, InMemoryUserRepository,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_customer_is_not_a_courier() {
        let ctx = test_context(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemorySessionStore::new()),
        );
        let err = CourierService::new(&ctx)
            .me(&sample_user(1))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
