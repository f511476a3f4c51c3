//! Integration test utilities for the Nutribite API
//!
//! Spins the real router up on an ephemeral port. Users and sessions live in
//! memory, so the ban paths run without PostgreSQL or Redis.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
