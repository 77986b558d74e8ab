use axum::routing::get;
use axum::Router;

use crate::handlers::assignment;
use crate::state::AppState;

/// Routes mounted at `/Assignments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assignment::list).post(assignment::create))
        .route(
            "/{project_id}/{developer_id}",
            get(assignment::get_by_keys)
                .put(assignment::update)
                .delete(assignment::delete),
        )
}
