//! Assignment entity model, DTOs and the per-project aggregation row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffing_core::assignment::AssignmentKey;
use staffing_core::types::{Date, DbId, RowVersion};

use crate::entity::{CompositeKeyed, Entity, SoftDeletable, SoftDelete};
use crate::filter::SqlValue;

/// A row from the `assignments` table, keyed by `(project_id, developer_id)`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub project_id: DbId,
    pub developer_id: DbId,
    pub role: String,
    pub weekly_hours: i32,
    pub assignment_date: Date,
    pub is_deleted: bool,
    pub row_version: RowVersion,
}

impl Assignment {
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey {
            project_id: self.project_id,
            developer_id: self.developer_id,
        }
    }
}

impl SoftDeletable for Assignment {
    const SOFT_DELETE: SoftDelete = SoftDelete::DeletedFlag("is_deleted");

    fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    fn set_visible(&mut self, visible: bool) {
        self.is_deleted = !visible;
    }
}

impl Entity for Assignment {
    const NAME: &'static str = "Assignment";
    const TABLE: &'static str = "assignments";
    const COLUMNS: &'static str =
        "project_id, developer_id, role, weekly_hours, assignment_date, is_deleted, row_version";
    const ORDER_BY: &'static str = "project_id, developer_id";

    fn row_version(&self) -> RowVersion {
        self.row_version
    }

    fn write_values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("project_id", self.project_id.into()),
            ("developer_id", self.developer_id.into()),
            ("role", self.role.clone().into()),
            ("weekly_hours", self.weekly_hours.into()),
            ("assignment_date", self.assignment_date.into()),
            ("is_deleted", self.is_deleted.into()),
        ]
    }
}

impl CompositeKeyed for Assignment {
    const KEY_COLUMNS: (&'static str, &'static str) = ("project_id", "developer_id");

    fn keys(&self) -> (DbId, DbId) {
        (self.project_id, self.developer_id)
    }
}

/// DTO for creating an assignment. `assignment_date` defaults to today (UTC).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub project_id: DbId,
    pub developer_id: DbId,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub weekly_hours: i32,
    pub assignment_date: Option<Date>,
}

/// DTO for replacing an assignment. Key fields, when sent, must match the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    pub project_id: Option<DbId>,
    pub developer_id: Option<DbId>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub weekly_hours: i32,
    pub assignment_date: Option<Date>,
    pub row_version: Option<RowVersion>,
}

/// One live assignment on a project, joined with its developer.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssignment {
    pub developer_id: DbId,
    pub full_name: String,
    pub email: String,
    pub seniority: String,
    pub role: String,
    pub weekly_hours: i32,
    pub assignment_date: Date,
}
