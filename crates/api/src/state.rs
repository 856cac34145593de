use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: hotelier_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Connected dashboard sockets.
    pub ws_manager: Arc<WsManager>,
    /// Room and booking events, published after each committed write.
    pub event_bus: Arc<hotelier_events::EventBus>,
}
