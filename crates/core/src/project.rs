//! Project status values and the storage-free project rule set.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rules::{check_max_len, require_non_empty};
use crate::types::Date;

/// Maximum length of a project name and client name.
pub const MAX_NAME_LEN: usize = 200;

pub const STATUS_PLANNED: &str = "planned";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_PAUSED: &str = "paused";
pub const STATUS_CLOSED: &str = "closed";

/// All valid project status strings.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PLANNED,
    STATUS_IN_PROGRESS,
    STATUS_PAUSED,
    STATUS_CLOSED,
];

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Paused,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planned => STATUS_PLANNED,
            ProjectStatus::InProgress => STATUS_IN_PROGRESS,
            ProjectStatus::Paused => STATUS_PAUSED,
            ProjectStatus::Closed => STATUS_CLOSED,
        }
    }

    /// Parse an exact (case-sensitive) status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_PLANNED => Ok(ProjectStatus::Planned),
            STATUS_IN_PROGRESS => Ok(ProjectStatus::InProgress),
            STATUS_PAUSED => Ok(ProjectStatus::Paused),
            STATUS_CLOSED => Ok(ProjectStatus::Closed),
            _ => Err(CoreError::Validation(format!(
                "Status must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/// Borrowed view of the client-supplied project fields.
#[derive(Debug, Clone, Copy)]
pub struct ProjectFields<'a> {
    pub name: &'a str,
    pub client: Option<&'a str>,
    pub status: &'a str,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Project fields after the shape checks have passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub name: String,
    pub client: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

/// Run the shape checks for a project create or update.
///
/// Order: name, client, status, start date, end date. The name is trimmed;
/// a blank client is stored as `None`.
pub fn validate_project(fields: &ProjectFields<'_>) -> Result<ValidProject, CoreError> {
    require_non_empty("Project name", fields.name)?;
    let name = fields.name.trim();
    check_max_len("Project name", name, MAX_NAME_LEN)?;

    let client = fields.client.map(str::trim).filter(|c| !c.is_empty());
    if let Some(client) = client {
        check_max_len("Client", client, MAX_NAME_LEN)?;
    }

    require_non_empty("Project status", fields.status)?;
    let status = ProjectStatus::parse(fields.status)?;

    let start_date = fields
        .start_date
        .ok_or_else(|| CoreError::Validation("Start date is required".into()))?;
    validate_date_range(start_date, fields.end_date)?;

    Ok(ValidProject {
        name: name.to_string(),
        client: client.map(str::to_string),
        status,
        start_date,
        end_date: fields.end_date,
    })
}

/// The end date, when present, must not be before the start date.
pub fn validate_date_range(start: Date, end: Option<Date>) -> Result<(), CoreError> {
    match end {
        Some(end) if end < start => Err(CoreError::Validation(
            "End date cannot be earlier than the start date".into(),
        )),
        _ => Ok(()),
    }
}
