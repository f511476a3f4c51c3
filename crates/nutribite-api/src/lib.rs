//! # nutribite-api
//!
//! REST API server built with Axum: cookie sessions, the session and admin
//! gates, and the JSON handlers for every resource.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
