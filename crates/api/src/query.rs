//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters of `GET /api/entries`.
///
/// `page`/`size`/`sort` are raw values; they are checked and clamped by
/// `PageRequest::parse`. `eagerload` selects whether tags are loaded.
#[derive(Debug, Default, Deserialize)]
pub struct EntryListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    #[serde(default)]
    pub eagerload: bool,
}
