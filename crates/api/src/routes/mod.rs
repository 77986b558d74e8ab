pub mod assignment;
pub mod developer;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /Projects                                  list, create
/// /Projects/{id}                             get, update, delete
/// /Projects/{id}/restore                     restore (POST)
/// /Projects/{id}/assignments                 assignments with developer details
///
/// /Developers                                list, create
/// /Developers/{id}                           get, update, delete
/// /Developers/{id}/status                    set active flag (PATCH)
/// /Developers/{id}/restore                   restore (POST)
///
/// /Assignments                               list, create
/// /Assignments/{project_id}/{developer_id}   get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/Projects", project::router())
        .nest("/Developers", developer::router())
        .nest("/Assignments", assignment::router())
}
