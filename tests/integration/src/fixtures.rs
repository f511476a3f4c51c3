//! Test fixtures and data generators

use chrono::{DateTime, Utc};
use nutribite_core::{AccountStatus, User, UserType};
use nutribite_service::services::testing::sample_user;
use serde::{Deserialize, Serialize};

/// Password every seeded account uses
pub const PASSWORD: &str = "Sup3rSecret";

pub fn customer(id: i64) -> User {
    sample_user(id)
}

pub fn courier(id: i64) -> User {
    let mut user = sample_user(id);
    user.user_type = UserType::Courier;
    user
}

pub fn admin(id: i64) -> User {
    let mut user = sample_user(id);
    user.user_type = UserType::Admin;
    user
}

/// Persisted as banned
pub fn banned(mut user: User) -> User {
    user.status = Some(AccountStatus::Banned);
    user.banned_at = Some(Utc::now());
    user
}

/// Still `active`, with a ban scheduled for `at`
pub fn scheduled_ban(mut user: User, at: DateTime<Utc>) -> User {
    user.ban_effective_at = Some(at);
    user
}

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
    #[serde(rename = "loginMethod")]
    pub login_method: &'static str,
}

impl LoginBody {
    pub fn for_user(user: &User) -> Self {
        Self::new(&user.email, PASSWORD)
    }

    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            login_method: "email",
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub user_type: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionBody {
    pub user: SessionUser,
}
