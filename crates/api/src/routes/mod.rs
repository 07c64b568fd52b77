pub mod health;
pub mod room;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rooms                       list, create
/// /rooms/available             free rooms
/// /rooms/reserved              reserved rooms
/// /rooms/stats                 counters for the dashboard
/// /rooms/sede/{sede}           rooms at one site
/// /rooms/{id}                  get, update (PUT/PATCH), delete
/// /rooms/{id}/toggle           flip availability (POST)
/// ```
///
/// Callers are expected to be authenticated by a gateway in front of this
/// service; no auth middleware is applied here.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/rooms", room::router())
}
