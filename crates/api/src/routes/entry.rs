//! Route definitions for the `/entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::entry;
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// PUT    /       -> update
/// GET    /{id}   -> get_by_id
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entry::list).post(entry::create).put(entry::update))
        .route("/{id}", get(entry::get_by_id).delete(entry::delete))
}
