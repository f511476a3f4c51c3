//! Error handling utilities for repositories

use nutribite_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Unique violations on the users table, told apart by index name
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    let phone_clash = e
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        .is_some_and(|name| name.contains("phone"));

    map_unique_violation(e, || {
        if phone_clash {
            DomainError::PhoneAlreadyExists
        } else {
            DomainError::EmailAlreadyExists
        }
    })
}
