//! Route definitions
//!
//! Health probes at the root; everything else under `/api` behind the
//! session gate. Admin routes additionally pass the admin gate, except the
//! admin login and session endpoints, which do their own checks.

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    admin, auth, couriers, customers, deliveries, health, messages, notifications, orders,
    recipes, users,
};
use crate::middleware::{admin_gate, session_gate};
use crate::state::AppState;

/// Create the main router
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes(state))
}

/// Health check routes (no session lookup)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalogue_routes())
        .merge(order_routes())
        .merge(courier_routes())
        .merge(inbox_routes())
        .merge(admin_routes(state))
        .layer(from_fn_with_state(state.clone(), session_gate))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/admin/auth/login", post(auth::admin_login))
        .route("/admin/auth/session", get(auth::admin_session))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/me/password", post(users::change_password))
        .route(
            "/customers/me",
            get(customers::get_profile).put(customers::upsert_profile),
        )
}

fn catalogue_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipes::search_recipes))
        .route("/recipes/:id", get(recipes::get_recipe))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(orders::list_own_orders).post(orders::create_order),
        )
        .route("/orders/:id", get(orders::get_own_order))
        .route("/orders/:id/cancel", post(orders::cancel_order))
}

fn courier_routes() -> Router<AppState> {
    Router::new()
        .route("/couriers/me", get(couriers::get_own_courier))
        .route("/couriers/me/availability", patch(couriers::set_availability))
        .route("/deliveries", get(deliveries::list_own_deliveries))
        .route("/deliveries/:id/status", patch(deliveries::update_delivery_status))
}

fn inbox_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/read-all",
            post(notifications::mark_all_notifications_read),
        )
        .route(
            "/notifications/:id/read",
            post(notifications::mark_notification_read),
        )
        .route("/messages", post(messages::send_message))
        .route("/messages/conversations", get(messages::list_conversations))
        .route("/messages/with/:id", get(messages::list_messages_with))
        .route("/messages/with/:id/read", post(messages::mark_conversation_read))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Users and bans
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id", get(admin::get_user))
        .route("/admin/users/:id/ban", post(admin::ban_user))
        .route("/admin/users/:id/unban", post(admin::unban_user))
        // Couriers
        .route(
            "/admin/couriers",
            get(couriers::list_couriers).post(couriers::create_courier),
        )
        .route("/admin/couriers/:id", delete(couriers::delete_courier))
        // Orders and deliveries
        .route("/admin/orders", get(orders::list_all_orders))
        .route("/admin/orders/:id/status", patch(orders::update_order_status))
        .route("/admin/deliveries", post(deliveries::assign_delivery))
        // Catalogue
        .route("/admin/recipes", post(recipes::create_recipe))
        .route(
            "/admin/recipes/:id",
            patch(recipes::update_recipe).delete(recipes::delete_recipe),
        )
        .route("/admin/notifications", post(notifications::create_notification))
        .route_layer(from_fn_with_state(state.clone(), admin_gate))
}
