use std::sync::Arc;

use roomdesk_db::RoomStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Room store (PostgreSQL or in-memory, chosen at startup).
    pub store: Arc<dyn RoomStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
