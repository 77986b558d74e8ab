//! Developer-specific lookups on top of the generic repository.

use sqlx::PgExecutor;
use staffing_core::types::DbId;

use crate::filter::Filter;
use crate::models::developer::Developer;
use crate::repositories::generic_repo::Repository;

pub type DeveloperRepo = Repository<Developer>;

impl Repository<Developer> {
    /// Whether an active developer other than `exclude_id` already uses `email`.
    pub async fn email_taken<'e>(
        executor: impl PgExecutor<'e>,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let filter = Filter::new()
            .eq("email", email)
            .ne_opt("developer_id", exclude_id);
        Self::exists(executor, &filter).await
    }
}
