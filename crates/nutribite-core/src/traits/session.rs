//! Server-side session storage port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repositories::RepoResult;
use crate::entities::UserType;

/// What a session remembers about its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(user_id: i64, user_type: UserType) -> Self {
        Self {
            user_id,
            user_type,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session and return its opaque ID
    async fn create(&self, data: &SessionData) -> RepoResult<String>;

    /// Look up a live session
    async fn get(&self, session_id: &str) -> RepoResult<Option<SessionData>>;

    /// Destroy one session
    async fn destroy(&self, session_id: &str) -> RepoResult<()>;

    /// Destroy every session of a user, returning how many were removed
    async fn revoke_user(&self, user_id: i64) -> RepoResult<u64>;
}
