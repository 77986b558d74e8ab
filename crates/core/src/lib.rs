//! Domain types and storage-free business rules for the staffing service.
//!
//! Everything in this crate is pure logic: the database-backed checks
//! (existence, uniqueness, referential conflicts) live in the API handlers
//! and run only after the rules here have passed.

pub mod assignment;
pub mod developer;
pub mod error;
pub mod project;
pub mod rules;
pub mod types;
