//! Staffing API server library.
//!
//! Exposes config, state, error handling and routes so integration tests and
//! the binary entrypoint share the same router.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
