use std::sync::Arc;

use jobstore_db::SharedJobRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Job repository, whichever adapter the configuration selected.
    pub jobs: SharedJobRepository,
    pub config: Arc<ServerConfig>,
}
