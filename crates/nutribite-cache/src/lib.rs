//! # nutribite-cache
//!
//! Redis layer backing the cookie sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Opaque session IDs mapped to their owner, with per-user revocation
//!
//! ## Example
//!
//! ```ignore
//! use nutribite_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//! use nutribite_core::{SessionData, SessionStore, UserType};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool, 86_400);
//!
//! let sid = sessions.create(&SessionData::new(42, UserType::Customer)).await?;
//! assert!(sessions.get(&sid).await?.is_some());
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use session::{generate_session_id, RedisSessionStore};
