//! Pagination extractor
//!
//! Reads `?page=&per_page=` into a clamped [`PageRequest`]. Other query
//! parameters are left for the handler's own `Query` extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use nutribite_service::dto::PageRequest;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Validated page window
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub PageRequest);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self(PageRequest::new(params.page, params.per_page))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Pagination::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<Pagination, ApiError> {
        let mut parts = Request::builder().uri(uri).body(()).unwrap().into_parts().0;
        Pagination::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_defaults() {
        let Pagination(page) = extract("/api/orders").await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, PageRequest::DEFAULT_PER_PAGE);
    }

    #[tokio::test]
    async fn test_clamps_and_ignores_other_params() {
        let Pagination(page) = extract("/api/admin/users?status=banned&page=0&per_page=1000")
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, PageRequest::MAX_PER_PAGE);
    }

    #[tokio::test]
    async fn test_rejects_garbage() {
        let err = extract("/api/orders?page=two").await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
