//! Axum extractors for request handling
//!
//! Custom extractors for the session user, validation, paths and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, CurrentUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::IdPath;
pub use validated::{JsonBody, ValidatedJson};
