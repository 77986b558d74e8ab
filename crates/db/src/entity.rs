//! Compile-time capabilities the generic repositories are written against.
//!
//! An entity declares how it is soft-deleted ([`SoftDelete`]), which table
//! and columns it maps to ([`Entity`]), and how it is addressed: by a single
//! key column ([`KeyedEntity`]) or by a two-column key ([`CompositeKeyed`]).

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use staffing_core::types::{DbId, RowVersion};

use crate::filter::SqlValue;

/// How rows of a table are hidden instead of removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDelete {
    /// Visible while the boolean column is `FALSE` (e.g. `is_deleted`).
    DeletedFlag(&'static str),
    /// Visible while the boolean column is `TRUE` (e.g. `is_active`).
    ActiveFlag(&'static str),
    /// Every row is visible; deletes are physical.
    None,
}

impl SoftDelete {
    /// SQL predicate selecting rows whose visibility equals `visible`.
    ///
    /// The column is qualified with `table` so the predicate stays
    /// unambiguous inside `ON CONFLICT ... DO UPDATE ... WHERE`.
    pub fn predicate(self, table: &str, visible: bool) -> String {
        match self {
            SoftDelete::DeletedFlag(column) => format!("{table}.{column} = {}", sql_bool(!visible)),
            SoftDelete::ActiveFlag(column) => format!("{table}.{column} = {}", sql_bool(visible)),
            SoftDelete::None => sql_bool(visible).to_string(),
        }
    }

    /// `SET` fragment that makes a row visible or hidden, or `None` when the
    /// type has no marker column.
    pub fn assignment(self, visible: bool) -> Option<String> {
        match self {
            SoftDelete::DeletedFlag(column) => Some(format!("{column} = {}", sql_bool(!visible))),
            SoftDelete::ActiveFlag(column) => Some(format!("{column} = {}", sql_bool(visible))),
            SoftDelete::None => None,
        }
    }
}

fn sql_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Accessor/mutator pair exposing a row's visibility.
pub trait SoftDeletable {
    const SOFT_DELETE: SoftDelete;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}

/// A table-backed row the generic repositories can read and write.
pub trait Entity: SoftDeletable + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Label used in not-found and conflict messages.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Select list shared by every read and `RETURNING` clause.
    const COLUMNS: &'static str;
    const ORDER_BY: &'static str;

    /// Optimistic concurrency token the row was read with.
    fn row_version(&self) -> RowVersion;

    /// Column/value pairs written on insert and update, in bind order.
    ///
    /// Generated keys and `row_version` are excluded; the repository
    /// maintains the token itself.
    fn write_values(&self) -> Vec<(&'static str, SqlValue)>;
}

/// Entity addressed by a single generated key column.
pub trait KeyedEntity: Entity {
    const KEY_COLUMN: &'static str;

    fn key(&self) -> DbId;
}

/// Entity addressed by a two-column key.
///
/// Composite-key columns are part of [`Entity::write_values`] because the
/// caller supplies them.
pub trait CompositeKeyed: Entity {
    const KEY_COLUMNS: (&'static str, &'static str);

    fn keys(&self) -> (DbId, DbId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_flag_predicates() {
        let marker = SoftDelete::DeletedFlag("is_deleted");
        assert_eq!(marker.predicate("projects", true), "projects.is_deleted = FALSE");
        assert_eq!(marker.predicate("projects", false), "projects.is_deleted = TRUE");
        assert_eq!(marker.assignment(false).as_deref(), Some("is_deleted = TRUE"));
        assert_eq!(marker.assignment(true).as_deref(), Some("is_deleted = FALSE"));
    }

    #[test]
    fn test_active_flag_predicates_are_inverted() {
        let marker = SoftDelete::ActiveFlag("is_active");
        assert_eq!(marker.predicate("developers", true), "developers.is_active = TRUE");
        assert_eq!(marker.predicate("developers", false), "developers.is_active = FALSE");
        assert_eq!(marker.assignment(false).as_deref(), Some("is_active = FALSE"));
    }

    #[test]
    fn test_no_marker_means_everything_visible() {
        assert_eq!(SoftDelete::None.predicate("t", true), "TRUE");
        assert_eq!(SoftDelete::None.predicate("t", false), "FALSE");
        assert_eq!(SoftDelete::None.assignment(false), None);
    }
}
