//! User entity - an account that can sign in (customer, courier, or admin)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Customer,
    Courier,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Courier => "courier",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "courier" => Ok(Self::Courier),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

/// Cached account status column.
///
/// Values are compared case-insensitively; anything unrecognised is kept
/// verbatim in `Other` so it round-trips to the database untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Active,
    Inactive,
    Banned,
    Other(String),
}

impl AccountStatus {
    /// Parse a raw status value
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "banned" => Self::Banned,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Banned => "banned",
            Self::Other(raw) => raw,
        }
    }

    #[inline]
    pub fn is_banned(&self) -> bool {
        matches!(self, Self::Banned)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AccountStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccountStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    /// `None` when the column is NULL
    pub status: Option<AccountStatus>,
    /// Scheduled ban activation time
    pub ban_effective_at: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    #[inline]
    pub fn is_courier(&self) -> bool {
        self.user_type == UserType::Courier
    }

    /// True when the cached status column already says `banned`
    #[inline]
    pub fn status_is_banned(&self) -> bool {
        self.status.as_ref().is_some_and(AccountStatus::is_banned)
    }

    /// Apply the flip locally after the database accepted it
    pub fn mark_banned(&mut self, at: DateTime<Utc>) {
        self.status = Some(AccountStatus::Banned);
        self.banned_at = Some(at);
        self.updated_at = at;
    }

    /// Whether `last_seen` is older than `interval` (or was never recorded)
    pub fn seen_before(&self, now: DateTime<Utc>, interval: chrono::Duration) -> bool {
        self.last_seen.is_none_or(|seen| now - seen >= interval)
    }
}

/// Values needed to insert a user; the id is assigned by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
}
