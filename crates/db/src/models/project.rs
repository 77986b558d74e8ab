//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffing_core::project::ValidProject;
use staffing_core::types::{Date, DbId, RowVersion};

use crate::entity::{Entity, KeyedEntity, SoftDeletable, SoftDelete};
use crate::filter::SqlValue;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: DbId,
    pub name: String,
    pub client: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: String,
    pub is_deleted: bool,
    pub row_version: RowVersion,
}

impl Project {
    /// A new, not yet persisted project. The key is assigned on insert.
    pub fn new(valid: ValidProject) -> Self {
        Self {
            project_id: 0,
            name: valid.name,
            client: valid.client,
            start_date: valid.start_date,
            end_date: valid.end_date,
            status: valid.status.as_str().to_string(),
            is_deleted: false,
            row_version: 1,
        }
    }

    /// Replace every client-editable field.
    pub fn apply(&mut self, valid: ValidProject) {
        self.name = valid.name;
        self.client = valid.client;
        self.start_date = valid.start_date;
        self.end_date = valid.end_date;
        self.status = valid.status.as_str().to_string();
    }
}

impl SoftDeletable for Project {
    const SOFT_DELETE: SoftDelete = SoftDelete::DeletedFlag("is_deleted");

    fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    fn set_visible(&mut self, visible: bool) {
        self.is_deleted = !visible;
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str =
        "project_id, name, client, start_date, end_date, status, is_deleted, row_version";
    const ORDER_BY: &'static str = "project_id";

    fn row_version(&self) -> RowVersion {
        self.row_version
    }

    fn write_values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("client", self.client.clone().into()),
            ("start_date", self.start_date.into()),
            ("end_date", self.end_date.into()),
            ("status", self.status.clone().into()),
            ("is_deleted", self.is_deleted.into()),
        ]
    }
}

impl KeyedEntity for Project {
    const KEY_COLUMN: &'static str = "project_id";

    fn key(&self) -> DbId {
        self.project_id
    }
}

/// DTO for creating a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[serde(default)]
    pub name: String,
    pub client: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub status: String,
}

/// DTO for replacing a project. `project_id`, when sent, must match the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    pub client: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub status: String,
    /// Token from the caller's last read; omitted means last write wins.
    pub row_version: Option<RowVersion>,
}
