//! Session records keyed by an opaque cookie value.
//!
//! `session:{sid}` holds the JSON [`SessionData`] with the session TTL, and
//! `user_sessions:{user_id}` indexes every sid a user owns so a ban can
//! revoke them all at once.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use nutribite_core::{DomainError, RepoResult, SessionData, SessionStore};
use rand::RngCore;

use crate::pool::{RedisPool, RedisPoolError};

const SESSION_PREFIX: &str = "session:";
const USER_SESSIONS_PREFIX: &str = "user_sessions:";
const SESSION_ID_BYTES: usize = 32;

/// 32 random bytes, base64url without padding
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn cache_error(err: RedisPoolError) -> DomainError {
    DomainError::CacheError(err.to_string())
}

#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: i64) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, data: &SessionData) -> RepoResult<String> {
        let session_id = generate_session_id();
        self.pool
            .set_json(&Self::key(&session_id), data, self.ttl_seconds)
            .await
            .map_err(cache_error)?;
        self.pool
            .add_to_set(&Self::user_key(data.user_id), &session_id, self.ttl_seconds)
            .await
            .map_err(cache_error)?;

        tracing::debug!(user_id = data.user_id, "Session created");
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> RepoResult<Option<SessionData>> {
        self.pool
            .get_json(&Self::key(session_id))
            .await
            .map_err(cache_error)
    }

    async fn destroy(&self, session_id: &str) -> RepoResult<()> {
        let key = Self::key(session_id);
        if let Some(data) = self
            .pool
            .get_json::<SessionData>(&key)
            .await
            .map_err(cache_error)?
        {
            self.pool
                .remove_from_set(&Self::user_key(data.user_id), session_id)
                .await
                .map_err(cache_error)?;
        }
        self.pool.delete(&key).await.map_err(cache_error)?;
        Ok(())
    }

    async fn revoke_user(&self, user_id: i64) -> RepoResult<u64> {
        let user_key = Self::user_key(user_id);
        let keys: Vec<String> = self
            .pool
            .set_members(&user_key)
            .await
            .map_err(cache_error)?
            .iter()
            .map(|sid| Self::key(sid))
            .collect();

        let removed = self.pool.delete_many(&keys).await.map_err(cache_error)?;
        self.pool.delete(&user_key).await.map_err(cache_error)?;

        tracing::info!(user_id, removed, "Revoked user sessions");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutribite_core::UserType;

    #[test]
    fn test_session_id_is_url_safe_and_long() {
        let sid = generate_session_id();
        // 32 bytes -> 43 unpadded base64 chars
        assert_eq!(sid.len(), 43);
        assert!(sid
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn test_key_generation() {
        assert_eq!(RedisSessionStore::key("abc"), "session:abc");
        assert_eq!(RedisSessionStore::user_key(7), "user_sessions:7");
    }

    #[test]
    fn test_session_data_json_shape() {
        let data = SessionData::new(9, UserType::Admin);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["user_id"], 9);
        assert_eq!(json["user_type"], "admin");
        let back: SessionData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[tokio::test]
    async fn test_unreachable_redis_maps_to_cache_error() {
        let pool = RedisPool::new(crate::RedisPoolConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
        })
        .unwrap();
        let store = RedisSessionStore::new(pool, 60);
        let err = store.get("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::CacheError(_)));
    }
}
