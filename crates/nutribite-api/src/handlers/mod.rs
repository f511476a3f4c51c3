//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod couriers;
pub mod customers;
pub mod deliveries;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod orders;
pub mod recipes;
pub mod users;
