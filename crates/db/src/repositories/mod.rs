//! Repository layer.
//!
//! Repositories are zero-sized types with async associated functions that
//! take any Postgres executor (`&PgPool` or `&mut *tx`) as first argument.
//! [`Repository`] and [`CompositeRepository`] implement the soft-delete
//! semantics once; the per-entity modules add the lookups specific to one
//! table.

pub mod assignment_repo;
pub mod composite_repo;
pub mod developer_repo;
pub mod generic_repo;
pub mod project_repo;

pub use assignment_repo::AssignmentRepo;
pub use composite_repo::CompositeRepository;
pub use developer_repo::DeveloperRepo;
pub use generic_repo::Repository;
pub use project_repo::ProjectRepo;
