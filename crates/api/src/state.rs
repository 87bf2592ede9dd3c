use crate::services::Services;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when running on the in-memory store.
    pub pool: Option<blog_db::DbPool>,
    /// One service per resource.
    pub services: Services,
}
