use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: staffing_db::DbPool,
    pub config: Arc<ServerConfig>,
}
