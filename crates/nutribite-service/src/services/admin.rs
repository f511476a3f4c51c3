//! Admin user management
//!
//! Listing accounts and setting or lifting bans. An immediate ban also
//! revokes every open session of the target; a scheduled ban is left to the
//! access guard, which denies and flips the account once the time passes.

use chrono::Utc;
use nutribite_core::entities::User;
use nutribite_core::traits::UserQuery;
use nutribite_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{AdminUserResponse, BanUserRequest, PageRequest, PaginatedResponse, UserListQuery};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AdminUserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminUserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: UserListQuery,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<AdminUserResponse>> {
        let status = query
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let users = self
            .ctx
            .user_repo()
            .list(&UserQuery {
                status: status.clone(),
                page: page.to_page(),
            })
            .await?;
        let total = self.ctx.user_repo().count(status.as_deref()).await?;

        Ok(PaginatedResponse::new(
            users.iter().map(AdminUserResponse::from).collect(),
            page.page,
            page.per_page,
            Some(total),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: i64) -> ServiceResult<AdminUserResponse> {
        Ok(AdminUserResponse::from(&self.load(user_id).await?))
    }

    /// Ban `target_id` now, or schedule it when `effective_at` is in the future
    #[instrument(skip(self, admin, request), fields(admin_id = admin.id))]
    pub async fn ban(
        &self,
        admin: &User,
        target_id: i64,
        request: BanUserRequest,
    ) -> ServiceResult<AdminUserResponse> {
        if admin.id == target_id {
            return Err(DomainError::CannotBanSelf.into());
        }
        self.load(target_id).await?;

        let reason = request
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        match request.effective_at {
            Some(at) if at > Utc::now() => {
                self.ctx
                    .user_repo()
                    .schedule_ban(target_id, at, reason)
                    .await?;
                info!(target_id, effective_at = %at, "Ban scheduled");
            }
            _ => {
                self.ctx.user_repo().ban_now(target_id, reason).await?;
                match self.ctx.session_store().revoke_user(target_id).await {
                    Ok(revoked) => info!(target_id, revoked, "User banned"),
                    Err(e) => warn!(target_id, error = %e, "User banned; session revocation failed"),
                }
            }
        }

        self.get(target_id).await
    }

    #[instrument(skip(self))]
    pub async fn unban(&self, target_id: i64) -> ServiceResult<AdminUserResponse> {
        self.load(target_id).await?;
        self.ctx.user_repo().unban(target_id).await?;
        info!(target_id, "User unbanned");
        self.get(target_id).await
    }

    async fn load(&self, user_id: i64) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        sample_user, test_context, InMemorySessionStore, InMemoryUserRepository,
    };
    use chrono::Duration;
    use nutribite_core::{AccountStatus, SessionData, SessionStore, UserType};
    use std::sync::Arc;

    fn admin() -> User {
        let mut admin = sample_user(1);
        admin.user_type = UserType::Admin;
        admin
    }

    fn setup() -> (Arc<InMemoryUserRepository>, Arc<InMemorySessionStore>, ServiceContext) {
        let users = Arc::new(InMemoryUserRepository::new());
        users.insert(admin());
        users.insert(sample_user(2));
        users.insert(sample_user(3));
        let sessions = Arc::new(InMemorySessionStore::new());
        let ctx = test_context(users.clone(), sessions.clone());
        (users, sessions, ctx)
    }

    #[tokio::test]
    async fn test_ban_now_revokes_sessions() {
        let (users, sessions, ctx) = setup();
        sessions
            .create(&SessionData::new(2, UserType::Customer))
            .await
            .unwrap();
        sessions
            .create(&SessionData::new(3, UserType::Customer))
            .await
            .unwrap();

        let response = AdminUserService::new(&ctx)
            .ban(
                &admin(),
                2,
                BanUserRequest {
                    effective_at: None,
                    reason: Some("  fraud ".to_string()),
                },
            )
            .await
            .unwrap();

        assert!(response.effectively_banned);
        assert_eq!(response.ban_reason.as_deref(), Some("fraud"));
        assert_eq!(users.get(2).unwrap().status, Some(AccountStatus::Banned));
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_past_effective_at_bans_now() {
        let (users, _sessions, ctx) = setup();
        AdminUserService::new(&ctx)
            .ban(
                &admin(),
                3,
                BanUserRequest {
                    effective_at: Some(Utc::now() - Duration::minutes(1)),
                    reason: None,
                },
            )
            .await
            .unwrap();
        assert!(users.get(3).unwrap().status_is_banned());
    }

    #[tokio::test]
    async fn test_future_ban_is_scheduled() {
        let (users, sessions, ctx) = setup();
        sessions
            .create(&SessionData::new(3, UserType::Customer))
            .await
            .unwrap();
        let at = Utc::now() + Duration::days(2);

        let response = AdminUserService::new(&ctx)
            .ban(
                &admin(),
                3,
                BanUserRequest {
                    effective_at: Some(at),
                    reason: None,
                },
            )
            .await
            .unwrap();

        assert!(!response.effectively_banned);
        assert_eq!(response.ban_effective_at, Some(at));
        assert_eq!(users.get(3).unwrap().status, Some(AccountStatus::Active));
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_ban_guards() {
        let (_users, _sessions, ctx) = setup();
        let service = AdminUserService::new(&ctx);

        let err = service
            .ban(&admin(), 1, BanUserRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service
            .ban(&admin(), 404, BanUserRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_unban_clears_ban_fields() {
        let (users, _sessions, ctx) = setup();
        let service = AdminUserService::new(&ctx);
        service
            .ban(&admin(), 2, BanUserRequest::default())
            .await
            .unwrap();

        let response = service.unban(2).await.unwrap();
        assert!(!response.effectively_banned);
        let stored = users.get(2).unwrap();
        assert!(stored.ban_effective_at.is_none());
        assert!(stored.banned_at.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_status_with_total() {
        let (_users, _sessions, ctx) = setup();
        let service = AdminUserService::new(&ctx);
        service
            .ban(&admin(), 3, BanUserRequest::default())
            .await
            .unwrap();

        let banned = service
            .list(
                UserListQuery {
                    status: Some("BANNED".to_string()),
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(banned.data.len(), 1);
        assert_eq!(banned.pagination.total, Some(1));

        let all = service
            .list(UserListQuery::default(), PageRequest::new(Some(1), Some(2)))
            .await
            .unwrap();
        assert_eq!(all.data.len(), 2);
        assert_eq!(all.pagination.total, Some(3));
        assert!(all.pagination.has_more);
    }
}
