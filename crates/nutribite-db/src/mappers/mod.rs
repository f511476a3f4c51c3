//! Entity <-> model mappers
//!
//! Conversions from database rows to domain entities. Rows whose enum
//! columns hold unknown values map through `TryFrom` and surface as
//! `DomainError::DatabaseError`.

mod courier;
mod customer;
mod delivery;
mod message;
mod notification;
mod order;
mod recipe;
mod user;

pub use order::{order_from_parts, orders_with_items};
