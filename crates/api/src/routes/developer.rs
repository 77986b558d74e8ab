use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::developer;
use crate::state::AppState;

/// Routes mounted at `/Developers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(developer::list).post(developer::create))
        .route(
            "/{id}",
            get(developer::get_by_id)
                .put(developer::update)
                .delete(developer::delete),
        )
        .route("/{id}/status", patch(developer::set_status))
        .route("/{id}/restore", post(developer::restore))
}
