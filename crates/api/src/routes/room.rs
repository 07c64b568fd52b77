//! Route definitions for the `/rooms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /available      -> list_available
/// GET    /reserved       -> list_reserved
/// GET    /stats          -> stats
/// GET    /sede/{sede}    -> list_by_site
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
/// POST   /{id}/toggle    -> toggle_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list).post(room::create))
        .route("/available", get(room::list_available))
        .route("/reserved", get(room::list_reserved))
        .route("/stats", get(room::stats))
        .route("/sede/{sede}", get(room::list_by_site))
        .route(
            "/{id}",
            get(room::get_by_id)
                .put(room::update)
                .patch(room::update)
                .delete(room::delete),
        )
        .route("/{id}/toggle", post(room::toggle_availability))
}
