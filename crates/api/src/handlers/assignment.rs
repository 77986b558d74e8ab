//! Handlers for the `/Assignments` resource, addressed by
//! `(project_id, developer_id)`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use staffing_core::assignment::{validate_assignment, AssignmentKey};
use staffing_core::error::CoreError;
use staffing_core::rules::check_path_matches_body;
use staffing_core::types::DbId;
use staffing_db::models::assignment::{Assignment, CreateAssignment, UpdateAssignment};
use staffing_db::repositories::{AssignmentRepo, DeveloperRepo, ProjectRepo};

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::handlers::created;
use crate::handlers::developer::ensure_developer_exists;
use crate::handlers::project::ensure_project_exists;
use crate::state::AppState;

/// GET /api/Assignments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Assignment>>> {
    let assignments = AssignmentRepo::list(&state.pool).await?;
    tracing::debug!(count = assignments.len(), "Listed assignments");
    Ok(Json(assignments))
}

/// GET /api/Assignments/{project_id}/{developer_id}
pub async fn get_by_keys(
    State(state): State<AppState>,
    Path((project_id, developer_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Assignment>> {
    let assignment = AssignmentRepo::find_by_keys(&state.pool, project_id, developer_id)
        .await?
        .ok_or_else(|| {
            CoreError::not_found("Assignment", assignment_key(project_id, developer_id))
        })?;
    Ok(Json(assignment))
}

/// POST /api/Assignments
///
/// Both parents are locked for the rest of the transaction so neither can
/// be deleted while the assignment is written. A soft-deleted row for the
/// same pair is revived with the new values.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<Response> {
    validate_assignment(&input.role, input.weekly_hours)?;
    let key = assignment_key(input.project_id, input.developer_id);

    let mut tx = state.pool.begin().await?;
    ProjectRepo::lock_visible(&mut *tx, input.project_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", input.project_id))?;
    DeveloperRepo::lock_visible(&mut *tx, input.developer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Developer", input.developer_id))?;

    let draft = Assignment {
        project_id: input.project_id,
        developer_id: input.developer_id,
        role: input.role.trim().to_string(),
        weekly_hours: input.weekly_hours,
        assignment_date: input
            .assignment_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        is_deleted: false,
        row_version: 1,
    };
    let assignment = AssignmentRepo::upsert_reviving(&mut *tx, &draft)
        .await?
        .ok_or_else(|| duplicate(key))?;
    tx.commit().await?;

    tracing::info!(
        project_id = key.project_id,
        developer_id = key.developer_id,
        weekly_hours = assignment.weekly_hours,
        revived = assignment.row_version > 1,
        "Assignment created"
    );
    Ok(created(
        format!("/api/Assignments/{}/{}", key.project_id, key.developer_id),
        assignment,
    ))
}

/// PUT /api/Assignments/{project_id}/{developer_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, developer_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<StatusCode> {
    check_path_matches_body("Project id", project_id, input.project_id)?;
    check_path_matches_body("Developer id", developer_id, input.developer_id)?;
    validate_assignment(&input.role, input.weekly_hours)?;
    let key = assignment_key(project_id, developer_id);

    let mut tx = state.pool.begin().await?;
    let mut assignment = AssignmentRepo::find_by_keys(&mut *tx, project_id, developer_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Assignment", key))?;
    ensure_project_exists(&mut *tx, project_id).await?;
    ensure_developer_exists(&mut *tx, developer_id).await?;

    assignment.role = input.role.trim().to_string();
    assignment.weekly_hours = input.weekly_hours;
    if let Some(date) = input.assignment_date {
        assignment.assignment_date = date;
    }
    if let Some(token) = input.row_version {
        assignment.row_version = token;
    }
    AssignmentRepo::update_by_keys(&mut *tx, &assignment)
        .await?
        .ok_or_else(|| {
            CoreError::Concurrency(format!("Assignment {key} was modified concurrently"))
        })?;
    tx.commit().await?;

    tracing::info!(project_id, developer_id, "Assignment updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Assignments/{project_id}/{developer_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, developer_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !AssignmentRepo::delete_by_keys(&state.pool, project_id, developer_id).await? {
        return Err(
            CoreError::not_found("Assignment", assignment_key(project_id, developer_id)).into(),
        );
    }
    tracing::info!(project_id, developer_id, "Assignment deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn assignment_key(project_id: DbId, developer_id: DbId) -> AssignmentKey {
    AssignmentKey {
        project_id,
        developer_id,
    }
}

fn duplicate(key: AssignmentKey) -> CoreError {
    CoreError::Conflict(format!(
        "Developer {} is already assigned to project {}",
        key.developer_id, key.project_id
    ))
}
