pub mod blog;
pub mod category;
pub mod entry;
pub mod health;
pub mod tag;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /blogs                 list, create, update
/// /blogs/{id}            get, delete
///
/// /entries               list (paged, ?eagerload=), create, update
/// /entries/{id}          get, delete
///
/// /categories            list, create, update
/// /categories/{id}       get, delete
///
/// /tags                  list, create, update
/// /tags/{id}             get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/blogs", blog::router())
        .nest("/entries", entry::router())
        .nest("/categories", category::router())
        .nest("/tags", tag::router())
}
