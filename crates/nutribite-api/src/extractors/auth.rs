//! Authentication extractors
//!
//! The session gate resolves the cookie once per request and stores the
//! admitted user in the request extensions; these extractors read it back.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use nutribite_core::User;

use crate::response::ApiError;

/// Request extension set by the session gate for an admitted user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticated user; rejects with 401 when the request has no session
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|current| AuthUser(current.0.clone()))
            .ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Utc;
    use nutribite_core::UserType;

    fn parts() -> Parts {
        Request::builder().body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthenticated() {
        let mut parts = parts();
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_reads_current_user() {
        let now = Utc::now();
        let user = User {
            id: 5,
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: None,
            user_type: UserType::Customer,
            status: None,
            ban_effective_at: None,
            banned_at: None,
            ban_reason: None,
            last_seen: None,
            created_at: now,
            updated_at: now,
        };
        let mut parts = parts();
        parts.extensions.insert(CurrentUser(user));

        let auth = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth.id(), 5);
    }
}
