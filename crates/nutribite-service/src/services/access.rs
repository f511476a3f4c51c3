//! Ban enforcement shared by every authenticated entry point.
//!
//! [`AccessGuard`] runs the pure evaluator from `nutribite_core::ban` and,
//! when a scheduled ban has elapsed without the status column catching up,
//! hands the user to [`BanReconciler`] for the guarded flip. Neither the flip
//! nor the presence stamp can change the access decision.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use nutribite_core::traits::UserRepository;
use nutribite_core::{BanAssessment, DomainError, RepoResult, User};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::error::{ServiceError, ServiceResult};

async fn flip(users: &dyn UserRepository, user_id: i64, timeout: Duration) -> RepoResult<bool> {
    tokio::time::timeout(timeout, users.mark_banned_if_unflipped(user_id))
        .await
        .map_err(|_| {
            DomainError::DatabaseError(format!(
                "ban reconcile timed out after {}ms",
                timeout.as_millis()
            ))
        })?
}

/// Brings `users.status` in line with an elapsed `ban_effective_at`
#[derive(Clone)]
pub struct BanReconciler {
    users: Arc<dyn UserRepository>,
    timeout: Duration,
}

impl BanReconciler {
    pub fn new(users: Arc<dyn UserRepository>, timeout: Duration) -> Self {
        Self { users, timeout }
    }

    /// Flip the row and, once the database accepted it, the in-memory copy.
    ///
    /// Returns whether this call performed the transition. A concurrent
    /// caller that got there first yields `Ok(false)`. The request path only
    /// denies and never reads the user again, so [`AccessGuard`] uses
    /// [`BanReconciler::spawn`]; this variant is for callers that keep
    /// working with `user` afterwards.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn reconcile(&self, user: &mut User) -> RepoResult<bool> {
        let flipped = flip(self.users.as_ref(), user.id, self.timeout).await?;
        user.mark_banned(Utc::now());
        if flipped {
            info!("Scheduled ban took effect");
        } else {
            debug!("Ban already recorded");
        }
        Ok(flipped)
    }

    /// Fire-and-forget variant used on the request path; failures are logged only
    pub fn spawn(&self, user_id: i64) -> JoinHandle<()> {
        let users = Arc::clone(&self.users);
        let timeout = self.timeout;
        tokio::spawn(async move {
            match flip(users.as_ref(), user_id, timeout).await {
                Ok(true) => info!(user_id, "Scheduled ban took effect"),
                Ok(false) => debug!(user_id, "Ban already recorded"),
                Err(e) => warn!(user_id, error = %e, "Ban reconcile failed"),
            }
        })
    }
}

impl std::fmt::Debug for BanReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BanReconciler")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Per-request ban gate
#[derive(Clone)]
pub struct AccessGuard {
    reconciler: BanReconciler,
    users: Arc<dyn UserRepository>,
    presence_interval: chrono::Duration,
}

impl AccessGuard {
    pub fn new(
        reconciler: BanReconciler,
        users: Arc<dyn UserRepository>,
        presence_interval: Duration,
    ) -> Self {
        Self {
            reconciler,
            users,
            presence_interval: chrono::Duration::from_std(presence_interval)
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    pub fn reconciler(&self) -> &BanReconciler {
        &self.reconciler
    }

    /// Deny an effectively banned user, scheduling the lazy flip when needed.
    ///
    /// Does not record presence; see [`AccessGuard::admit`].
    pub fn check(&self, user: &User) -> ServiceResult<()> {
        self.check_at(user, Utc::now()).map(|_| ())
    }

    /// Full call-site contract: ban check, then a throttled presence stamp
    pub fn admit(&self, user: &User) -> ServiceResult<()> {
        let now = Utc::now();
        self.check_at(user, now)?;
        if user.seen_before(now, self.presence_interval) {
            self.touch_presence(user.id);
        }
        Ok(())
    }

    /// Administrators only; runs after the ban check
    pub fn require_admin(&self, user: &User) -> ServiceResult<()> {
        if user.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Domain(DomainError::AdminRequired))
        }
    }

    fn check_at(&self, user: &User, now: DateTime<Utc>) -> ServiceResult<BanAssessment> {
        let assessment = BanAssessment::evaluate(user, now);
        if assessment.is_blocked() {
            if assessment.needs_reconcile() {
                self.reconciler.spawn(user.id);
            }
            debug!(user_id = user.id, "Banned account denied");
            return Err(ServiceError::banned());
        }
        Ok(assessment)
    }

    fn touch_presence(&self, user_id: i64) {
        let users = Arc::clone(&self.users);
        let timeout = self.reconciler.timeout;
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, users.touch_last_seen(user_id)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(user_id, error = %e, "Presence update failed"),
                Err(_) => warn!(user_id, "Presence update timed out"),
            }
        });
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("reconciler", &self.reconciler)
            .field("presence_interval", &self.presence_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{sample_user, InMemoryUserRepository};
    use chrono::Duration as ChronoDuration;

    fn guard(users: Arc<InMemoryUserRepository>) -> AccessGuard {
        let reconciler = BanReconciler::new(users.clone(), Duration::from_secs(2));
        AccessGuard::new(reconciler, users, Duration::from_secs(60))
    }

    async fn settle() {
        // let spawned reconcile/presence tasks run
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_banned_status_denied_without_write() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(1);
        user.status = Some(nutribite_core::AccountStatus::parse("BANNED"));
        users.insert(user.clone());

        let err = guard(users.clone()).admit(&user).unwrap_err();
        assert!(err.is_banned());
        settle().await;
        assert_eq!(users.flip_attempts(), 0);
    }

    #[tokio::test]
    async fn test_elapsed_schedule_denied_and_flipped() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(2);
        user.ban_effective_at = Some("2020-01-01T00:00:00Z".parse().unwrap());
        users.insert(user.clone());

        let err = guard(users.clone()).admit(&user).unwrap_err();
        assert_eq!(err.status_code(), 403);
        settle().await;

        let stored = users.get(2).unwrap();
        assert!(stored.status_is_banned());
        assert!(stored.banned_at.is_some());
    }

    #[tokio::test]
    async fn test_active_user_admitted_and_seen() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = sample_user(3);
        users.insert(user.clone());

        guard(users.clone()).admit(&user).unwrap();
        settle().await;

        assert_eq!(users.flip_attempts(), 0);
        assert!(users.get(3).unwrap().last_seen.is_some());
    }

    #[tokio::test]
    async fn test_recent_presence_not_rewritten() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(4);
        let seen = Utc::now() - ChronoDuration::seconds(5);
        user.last_seen = Some(seen);
        users.insert(user.clone());

        guard(users.clone()).admit(&user).unwrap();
        settle().await;
        assert_eq!(users.get(4).unwrap().last_seen, Some(seen));
    }

    #[tokio::test]
    async fn test_future_schedule_admitted() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(5);
        user.ban_effective_at = Some(Utc::now() + ChronoDuration::days(1));
        users.insert(user.clone());

        assert!(guard(users.clone()).check(&user).is_ok());
        settle().await;
        assert_eq!(users.flip_attempts(), 0);
    }

    #[tokio::test]
    async fn test_failing_reconcile_still_denies() {
        let users = Arc::new(InMemoryUserRepository::new());
        users.fail_writes(true);
        let mut user = sample_user(6);
        user.ban_effective_at = Some(Utc::now() - ChronoDuration::minutes(1));
        users.insert(user.clone());

        let guard = guard(users.clone());
        let err = guard.check(&user).unwrap_err();
        assert!(err.is_banned());

        // the direct path surfaces the failure to its caller instead
        let mut copy = user.clone();
        assert!(guard.reconciler().reconcile(&mut copy).await.is_err());
        assert!(!copy.status_is_banned());
    }

    #[tokio::test]
    async fn test_concurrent_reconciles_flip_once() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(7);
        user.ban_effective_at = Some(Utc::now() - ChronoDuration::seconds(1));
        users.insert(user.clone());

        let reconciler = BanReconciler::new(users.clone(), Duration::from_secs(2));
        let (mut a, mut b) = (user.clone(), user.clone());
        let (first, second) = tokio::join!(reconciler.reconcile(&mut a), reconciler.reconcile(&mut b));

        let flips = [first.unwrap(), second.unwrap()];
        assert_eq!(flips.iter().filter(|f| **f).count(), 1);
        assert!(a.status_is_banned() && b.status_is_banned());
        assert_eq!(users.flip_attempts(), 2);
    }

    #[tokio::test]
    async fn test_spawned_reconcile_is_awaitable() {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut user = sample_user(8);
        user.ban_effective_at = Some(Utc::now() - ChronoDuration::seconds(1));
        users.insert(user);

        let reconciler = BanReconciler::new(users.clone(), Duration::from_secs(2));
        reconciler.spawn(8).await.unwrap();
        reconciler.spawn(8).await.unwrap();

        assert!(users.get(8).unwrap().status_is_banned());
        assert_eq!(users.flips_performed(), 1);
    }

    #[tokio::test]
    async fn test_require_admin() {
        let users = Arc::new(InMemoryUserRepository::new());
        let guard = guard(users);
        let mut user = sample_user(9);
        assert_eq!(guard.require_admin(&user).unwrap_err().status_code(), 403);
        user.user_type = nutribite_core::UserType::Admin;
        assert!(guard.require_admin(&user).is_ok());
    }
}
