//! User service
//!
//! Profile reads and edits for the signed-in user.

use nutribite_common::AppError;
use nutribite_core::entities::User;
use tracing::{info, instrument};

use crate::dto::{ChangePasswordRequest, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.get_user_entity(user_id).await?;

        let mut changed = false;
        if let Some(name) = request.name.map(|n| n.trim().to_string()) {
            if name.is_empty() {
                return Err(ServiceError::validation("Name cannot be blank"));
            }
            if name != user.name {
                user.name = name;
                changed = true;
            }
        }
        if let Some(phone) = request.phone.map(|p| p.trim().to_string()) {
            let phone = (!phone.is_empty()).then_some(phone);
            if phone != user.phone {
                user.phone = phone;
                changed = true;
            }
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id, "Profile updated");
        }

        Ok(UserResponse::from(&user))
    }

    /// Requires the current password; the new one must pass the strength rules
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let stored = self.ctx.user_repo().get_password_hash(user_id).await?;
        self.ctx
            .passwords()
            .check_login(&request.current_password, stored.as_deref())
            .map_err(|e| match e {
                AppError::InvalidCredentials => {
                    ServiceError::validation("Current password is incorrect")
                }
                other => ServiceError::App(other),
            })?;

        let hash = self.ctx.passwords().hash_new(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        sample_user, test_context, InMemorySessionStore, InMemoryUserRepository,
    };
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryUserRepository>, ServiceContext) {
        let users = Arc::new(InMemoryUserRepository::new());
        let ctx = test_context(users.clone(), Arc::new(InMemorySessionStore::new()));
        (users, ctx)
    }

    #[tokio::test]
    async fn test_update_user_trims_and_clears_phone() {
        let (users, ctx) = setup();
        let mut user = sample_user(1);
        user.phone = Some("+15550100".to_string());
        users.insert(user);

        let response = UserService::new(&ctx)
            .update_user(
                1,
                UpdateUserRequest {
                    name: Some("  Ada L. ".to_string()),
                    phone: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.name, "Ada L.");
        assert!(response.phone.is_none());
        assert!(users.get(1).unwrap().phone.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let (_users, ctx) = setup();
        let err = UserService::new(&ctx)
            .update_user(
                42,
                UpdateUserRequest {
                    name: None,
                    phone: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_change_password() {
        let (users, ctx) = setup();
        users.insert_with_password(sample_user(2), "OldPassw0rd");
        let service = UserService::new(&ctx);

        let wrong = service
            .change_password(
                2,
                ChangePasswordRequest {
                    current_password: "guess".to_string(),
                    new_password: "NewPassw0rd".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(wrong.status_code(), 400);

        let weak = service
            .change_password(
                2,
                ChangePasswordRequest {
                    current_password: "OldPassw0rd".to_string(),
                    new_password: "alllowercase".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(weak.status_code(), 400);

        service
            .change_password(
                2,
                ChangePasswordRequest {
                    current_password: "OldPassw0rd".to_string(),
                    new_password: "NewPassw0rd".to_string(),
                },
            )
            .await
            .unwrap();
        let hash = users.get_password_hash_sync(2);
        assert!(nutribite_common::verify_password("NewPassw0rd", &hash).unwrap());
    }
}
