//! Cookie session storage backed by Redis.

mod store;

pub use store::{generate_session_id, RedisSessionStore};
