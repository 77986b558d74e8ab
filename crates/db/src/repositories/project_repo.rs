//! Project-specific lookups on top of the generic repository.

use sqlx::PgExecutor;
use staffing_core::types::DbId;

use crate::filter::Filter;
use crate::models::project::Project;
use crate::repositories::generic_repo::Repository;

pub type ProjectRepo = Repository<Project>;

impl Repository<Project> {
    /// Whether a non-deleted project other than `exclude_id` already uses
    /// `name` (case-sensitive exact match).
    pub async fn name_taken<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let filter = Filter::new()
            .eq("name", name)
            .ne_opt("project_id", exclude_id);
        Self::exists(executor, &filter).await
    }
}
