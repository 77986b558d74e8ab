//! Handlers for the `/Projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use sqlx::PgExecutor;
use staffing_core::error::CoreError;
use staffing_core::project::{validate_project, ProjectFields};
use staffing_core::rules::check_path_matches_body;
use staffing_core::types::DbId;
use staffing_db::models::assignment::ProjectAssignment;
use staffing_db::models::project::{CreateProject, Project, UpdateProject};
use staffing_db::repositories::{AssignmentRepo, ProjectRepo};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::handlers::created;
use crate::query::IncludeDeletedParams;
use crate::state::AppState;

/// Verify that a visible project exists, returning it.
pub async fn ensure_project_exists<'e>(
    executor: impl PgExecutor<'e>,
    id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(executor, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id).into())
}

async fn ensure_name_free<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if ProjectRepo::name_taken(executor, name, exclude_id).await? {
        return Err(
            CoreError::Conflict(format!("A project named '{name}' already exists")).into(),
        );
    }
    Ok(())
}

/// GET /api/Projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeDeletedParams>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = if params.include_deleted {
        ProjectRepo::list_including_deleted(&state.pool).await?
    } else {
        ProjectRepo::list(&state.pool).await?
    };
    tracing::debug!(
        count = projects.len(),
        include_deleted = params.include_deleted,
        "Listed projects"
    );
    Ok(Json(projects))
}

/// GET /api/Projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ensure_project_exists(&state.pool, id).await?;
    Ok(Json(project))
}

/// POST /api/Projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<Response> {
    let valid = validate_project(&ProjectFields {
        name: &input.name,
        client: input.client.as_deref(),
        status: &input.status,
        start_date: input.start_date,
        end_date: input.end_date,
    })?;

    let mut tx = state.pool.begin().await?;
    ensure_name_free(&mut *tx, &valid.name, None).await?;
    let project = ProjectRepo::create(&mut *tx, &Project::new(valid)).await?;
    tx.commit().await?;

    tracing::info!(project_id = project.project_id, name = %project.name, "Project created");
    Ok(created(
        format!("/api/Projects/{}", project.project_id),
        project,
    ))
}

/// PUT /api/Projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<StatusCode> {
    check_path_matches_body("Project id", id, input.project_id)?;
    let valid = validate_project(&ProjectFields {
        name: &input.name,
        client: input.client.as_deref(),
        status: &input.status,
        start_date: input.start_date,
        end_date: input.end_date,
    })?;

    let mut tx = state.pool.begin().await?;
    let mut project = ensure_project_exists(&mut *tx, id).await?;
    ensure_name_free(&mut *tx, &valid.name, Some(id)).await?;

    project.apply(valid);
    if let Some(token) = input.row_version {
        project.row_version = token;
    }
    let updated = ProjectRepo::update(&mut *tx, &project)
        .await?
        .ok_or_else(|| {
            CoreError::Concurrency(format!("Project {id} was modified concurrently"))
        })?;
    tx.commit().await?;

    tracing::info!(project_id = id, row_version = updated.row_version, "Project updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Projects/{id}
///
/// Refused while any live assignment references the project. The project
/// row is locked so no assignment can be added between check and delete.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    ProjectRepo::lock_visible(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Project", id))?;

    if AssignmentRepo::has_active_for_project(&mut *tx, id).await? {
        return Err(CoreError::Conflict(
            "The project has active assignments and cannot be deleted".into(),
        )
        .into());
    }

    if !ProjectRepo::soft_delete(&mut *tx, id).await? {
        return Err(CoreError::not_found("Project", id).into());
    }
    tx.commit().await?;

    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/Projects/{id}/restore
pub async fn restore(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::find_by_id_including_deleted(&mut *tx, id)
        .await?
        .filter(|p| p.is_deleted)
        .ok_or_else(|| CoreError::not_found("Deleted project", id))?;
    ensure_name_free(&mut *tx, &project.name, Some(id)).await?;

    if !ProjectRepo::restore(&mut *tx, id).await? {
        return Err(CoreError::not_found("Deleted project", id).into());
    }
    tx.commit().await?;

    tracing::info!(project_id = id, "Project restored");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/Projects/{id}/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectAssignment>>> {
    ensure_project_exists(&state.pool, id).await?;
    let rows = AssignmentRepo::details_by_project(&state.pool, id).await?;
    tracing::debug!(project_id = id, count = rows.len(), "Listed project assignments");
    Ok(Json(rows))
}
