//! Query parameter types shared by the list endpoints.

use serde::Deserialize;

/// `?includeDeleted=true` on project listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeDeletedParams {
    #[serde(default)]
    pub include_deleted: bool,
}

/// `?includeInactive=true` on developer listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
