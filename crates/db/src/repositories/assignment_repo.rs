//! Assignment lookups and the per-project aggregation query.

use sqlx::PgExecutor;
use staffing_core::types::DbId;

use crate::filter::Filter;
use crate::models::assignment::{Assignment, ProjectAssignment};
use crate::repositories::composite_repo::CompositeRepository;

pub type AssignmentRepo = CompositeRepository<Assignment>;

impl CompositeRepository<Assignment> {
    /// Whether any non-deleted assignment references the project.
    pub async fn has_active_for_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::exists(executor, &Filter::new().eq("project_id", project_id)).await
    }

    /// Whether any non-deleted assignment references the developer.
    pub async fn has_active_for_developer<'e>(
        executor: impl PgExecutor<'e>,
        developer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::exists(executor, &Filter::new().eq("developer_id", developer_id)).await
    }

    /// Live assignments on a project joined with developer details, via the
    /// `assignments_by_project` SQL function.
    ///
    /// Does not check that the project exists; an unknown id yields an
    /// empty list.
    pub async fn details_by_project<'e>(
        executor: impl PgExecutor<'e>,
        project_id: DbId,
    ) -> Result<Vec<ProjectAssignment>, sqlx::Error> {
        sqlx::query_as::<_, ProjectAssignment>(
            "SELECT developer_id, full_name, email, seniority, role, weekly_hours, assignment_date \
             FROM assignments_by_project($1)",
        )
        .bind(project_id)
        .fetch_all(executor)
        .await
    }
}
