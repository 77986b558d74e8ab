//! Developer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffing_core::developer::ValidDeveloper;
use staffing_core::types::{DbId, RowVersion};

use crate::entity::{Entity, KeyedEntity, SoftDeletable, SoftDelete};
use crate::filter::SqlValue;

/// A row from the `developers` table.
///
/// `is_active` is an inverted soft-delete flag: inactive developers are
/// hidden from default reads.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub developer_id: DbId,
    pub full_name: String,
    pub email: String,
    pub seniority: String,
    pub is_active: bool,
    pub row_version: RowVersion,
}

impl Developer {
    /// A new developer. Developers always start active.
    pub fn new(valid: ValidDeveloper) -> Self {
        Self {
            developer_id: 0,
            full_name: valid.full_name,
            email: valid.email,
            seniority: valid.seniority.as_str().to_string(),
            is_active: true,
            row_version: 1,
        }
    }

    pub fn apply(&mut self, valid: ValidDeveloper) {
        self.full_name = valid.full_name;
        self.email = valid.email;
        self.seniority = valid.seniority.as_str().to_string();
    }
}

impl SoftDeletable for Developer {
    const SOFT_DELETE: SoftDelete = SoftDelete::ActiveFlag("is_active");

    fn is_visible(&self) -> bool {
        self.is_active
    }

    fn set_visible(&mut self, visible: bool) {
        self.is_active = visible;
    }
}

impl Entity for Developer {
    const NAME: &'static str = "Developer";
    const TABLE: &'static str = "developers";
    const COLUMNS: &'static str =
        "developer_id, full_name, email, seniority, is_active, row_version";
    const ORDER_BY: &'static str = "developer_id";

    fn row_version(&self) -> RowVersion {
        self.row_version
    }

    fn write_values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("full_name", self.full_name.clone().into()),
            ("email", self.email.clone().into()),
            ("seniority", self.seniority.clone().into()),
            ("is_active", self.is_active.into()),
        ]
    }
}

impl KeyedEntity for Developer {
    const KEY_COLUMN: &'static str = "developer_id";

    fn key(&self) -> DbId {
        self.developer_id
    }
}

/// DTO for creating a developer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeveloper {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub seniority: String,
}

/// DTO for replacing a developer. Activation is changed through the
/// status endpoint, not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeveloper {
    pub developer_id: Option<DbId>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub seniority: String,
    pub row_version: Option<RowVersion>,
}
