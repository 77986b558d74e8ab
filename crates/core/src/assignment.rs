//! Storage-free assignment rules: role shape and weekly-hours bounds.

use std::fmt;

use crate::error::CoreError;
use crate::rules::{check_max_len, require_non_empty};
use crate::types::DbId;

/// Inclusive lower bound for weekly hours.
pub const MIN_WEEKLY_HOURS: i32 = 1;
/// Inclusive upper bound for weekly hours.
pub const MAX_WEEKLY_HOURS: i32 = 40;
/// Maximum length of an assignment role.
pub const MAX_ROLE_LEN: usize = 50;

/// Composite identity of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentKey {
    pub project_id: DbId,
    pub developer_id: DbId,
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_id, self.developer_id)
    }
}

pub fn validate_weekly_hours(hours: i32) -> Result<(), CoreError> {
    if !(MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&hours) {
        return Err(CoreError::Validation(format!(
            "Weekly hours must be between {MIN_WEEKLY_HOURS} and {MAX_WEEKLY_HOURS}"
        )));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    require_non_empty("Role", role)?;
    check_max_len("Role", role.trim(), MAX_ROLE_LEN)
}

/// Shape checks shared by assignment create and update.
pub fn validate_assignment(role: &str, weekly_hours: i32) -> Result<(), CoreError> {
    validate_role(role)?;
    validate_weekly_hours(weekly_hours)
}
