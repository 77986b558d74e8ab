//! Entity rows and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row,
//!   together with its repository capability impls
//! - A `Deserialize` create DTO
//! - A `Deserialize` update DTO carrying the optional concurrency token

pub mod assignment;
pub mod developer;
pub mod project;
