//! Handlers for the `/Developers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use sqlx::PgExecutor;
use staffing_core::developer::{validate_developer, DeveloperFields};
use staffing_core::error::CoreError;
use staffing_core::rules::check_path_matches_body;
use staffing_core::types::DbId;
use staffing_db::entity::SoftDeletable;
use staffing_db::models::developer::{CreateDeveloper, Developer, UpdateDeveloper};
use staffing_db::repositories::{AssignmentRepo, DeveloperRepo};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::handlers::created;
use crate::query::IncludeInactiveParams;
use crate::state::AppState;

/// Verify that an active developer exists, returning it.
pub async fn ensure_developer_exists<'e>(
    executor: impl PgExecutor<'e>,
    id: DbId,
) -> AppResult<Developer> {
    DeveloperRepo::find_by_id(executor, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Developer", id).into())
}

async fn ensure_email_free<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    if DeveloperRepo::email_taken(executor, email, exclude_id).await? {
        return Err(CoreError::Conflict(format!(
            "An active developer with email '{email}' already exists"
        ))
        .into());
    }
    Ok(())
}

/// GET /api/Developers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<Vec<Developer>>> {
    let developers = if params.include_inactive {
        DeveloperRepo::list_including_deleted(&state.pool).await?
    } else {
        DeveloperRepo::list(&state.pool).await?
    };
    tracing::debug!(count = developers.len(), "Listed developers");
    Ok(Json(developers))
}

/// GET /api/Developers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Developer>> {
    Ok(Json(ensure_developer_exists(&state.pool, id).await?))
}

/// POST /api/Developers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDeveloper>,
) -> AppResult<Response> {
    let valid = validate_developer(&DeveloperFields {
        full_name: &input.full_name,
        email: &input.email,
        seniority: &input.seniority,
    })?;

    let mut tx = state.pool.begin().await?;
    ensure_email_free(&mut *tx, &valid.email, None).await?;
    let developer = DeveloperRepo::create(&mut *tx, &Developer::new(valid)).await?;
    tx.commit().await?;

    tracing::info!(
        developer_id = developer.developer_id,
        email = %developer.email,
        "Developer created"
    );
    Ok(created(
        format!("/api/Developers/{}", developer.developer_id),
        developer,
    ))
}

/// PUT /api/Developers/{id}
///
/// Replaces name, email and seniority. Activation is left untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeveloper>,
) -> AppResult<StatusCode> {
    check_path_matches_body("Developer id", id, input.developer_id)?;
    let valid = validate_developer(&DeveloperFields {
        full_name: &input.full_name,
        email: &input.email,
        seniority: &input.seniority,
    })?;

    let mut tx = state.pool.begin().await?;
    let mut developer = ensure_developer_exists(&mut *tx, id).await?;
    ensure_email_free(&mut *tx, &valid.email, Some(id)).await?;

    developer.apply(valid);
    if let Some(token) = input.row_version {
        developer.row_version = token;
    }
    DeveloperRepo::update(&mut *tx, &developer)
        .await?
        .ok_or_else(|| {
            CoreError::Concurrency(format!("Developer {id} was modified concurrently"))
        })?;
    tx.commit().await?;

    tracing::info!(developer_id = id, "Developer updated");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/Developers/{id}/status
///
/// Sets the active flag directly. Unlike DELETE this does not refuse
/// deactivation while assignments reference the developer. Reactivation
/// still has to respect email uniqueness among active developers.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(active): Json<bool>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let mut developer = DeveloperRepo::find_by_id_including_deleted(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Developer", id))?;

    if active && !developer.is_visible() {
        ensure_email_free(&mut *tx, &developer.email, Some(id)).await?;
    }

    developer.set_visible(active);
    DeveloperRepo::update(&mut *tx, &developer)
        .await?
        .ok_or_else(|| {
            CoreError::Concurrency(format!("Developer {id} was modified concurrently"))
        })?;
    tx.commit().await?;

    tracing::info!(developer_id = id, active, "Developer status changed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Developers/{id}
///
/// Deactivates the developer. Refused while any live assignment references it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    DeveloperRepo::lock_visible(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Developer", id))?;

    if AssignmentRepo::has_active_for_developer(&mut *tx, id).await? {
        return Err(CoreError::Conflict(
            "The developer has active assignments and cannot be deactivated".into(),
        )
        .into());
    }

    if !DeveloperRepo::soft_delete(&mut *tx, id).await? {
        return Err(CoreError::not_found("Developer", id).into());
    }
    tx.commit().await?;

    tracing::info!(developer_id = id, "Developer deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/Developers/{id}/restore
pub async fn restore(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let developer = DeveloperRepo::find_by_id_including_deleted(&mut *tx, id)
        .await?
        .filter(|d| !d.is_active)
        .ok_or_else(|| CoreError::not_found("Inactive developer", id))?;
    ensure_email_free(&mut *tx, &developer.email, Some(id)).await?;

    if !DeveloperRepo::restore(&mut *tx, id).await? {
        return Err(CoreError::not_found("Inactive developer", id).into());
    }
    tx.commit().await?;

    tracing::info!(developer_id = id, "Developer restored");
    Ok(StatusCode::NO_CONTENT)
}
