//! Route definitions for the `/blogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
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
        .route("/", get(blog::list).post(blog::create).put(blog::update))
        .route("/{id}", get(blog::get_by_id).delete(blog::delete))
}
