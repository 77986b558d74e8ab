use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/Projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/restore", post(project::restore))
        .route("/{id}/assignments", get(project::list_assignments))
}
