//! Service layer errors
//!
//! Services return domain errors from the repositories untouched and add the
//! few failures that only make sense at this layer.

use nutribite_common::{domain_status, AppError};
use nutribite_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Auth, access and config failures
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn banned() -> Self {
        Self::App(AppError::AccountBanned)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// `Account is banned`, whichever layer raised it
    pub fn is_banned(&self) -> bool {
        matches!(
            self,
            Self::App(AppError::AccountBanned) | Self::Domain(DomainError::AccountBanned)
        )
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Order", "12");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Order not found: 12");
    }

    #[test]
    fn test_banned_from_either_layer() {
        let err = ServiceError::banned();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.to_string(), "Account is banned");
        assert!(err.is_banned());
        assert!(ServiceError::from(DomainError::AccountBanned).is_banned());
        assert!(!ServiceError::validation("nope").is_banned());
    }

    #[test]
    fn test_domain_status_mapping() {
        assert_eq!(ServiceError::from(DomainError::CannotBanSelf).status_code(), 400);
        assert_eq!(ServiceError::from(DomainError::UserNotFound(3)).status_code(), 404);
        assert_eq!(ServiceError::from(DomainError::AdminRequired).status_code(), 403);
    }

    #[test]
    fn test_into_app_error() {
        let app_err: AppError = ServiceError::not_found("Recipe", "456").into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::banned().into();
        assert_eq!(app_err.to_string(), "Account is banned");
    }
}
