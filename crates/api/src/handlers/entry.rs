//! Handlers for the `/entries` resource.
//!
//! Listing is paginated. `?eagerload=true` loads each entry's tags with the
//! page; otherwise `tags` is omitted from the listed entries. Single-entry
//! responses always carry their tags.

use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::dto::{EntryDto, Resource};
use blog_core::pagination::PageRequest;
use blog_core::types::DbId;
use blog_db::models::entry::SORTABLE;

use super::{ensure_new, require_id, wrap_or_not_found};
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::headers;
use crate::query::EntryListParams;
use crate::state::AppState;

/// POST /api/entries
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<EntryDto>,
) -> AppResult<impl IntoResponse> {
    ensure_new(&dto)?;
    let entry = state.services.entries.save(&dto).await?;
    let id = entry.id.unwrap_or_default().to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/entries/{id}"))],
        headers::entity_creation_alert(EntryDto::ENTITY_NAME, &id),
        Json(entry),
    ))
}

/// PUT /api/entries
///
/// Overwrites the entry named by the body's `id`. Omitting `tags` keeps
/// the current tag links.
pub async fn update(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<EntryDto>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(&dto)?;
    let entry = state.services.entries.save(&dto).await?;
    Ok((
        headers::entity_update_alert(EntryDto::ENTITY_NAME, &id.to_string()),
        Json(entry),
    ))
}

/// GET /api/entries?page=&size=&sort=&eagerload=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> AppResult<impl IntoResponse> {
    let request = PageRequest::parse(params.page, params.size, params.sort.as_deref(), SORTABLE)?;

    let entries = &state.services.entries;
    let page = if params.eagerload {
        entries.find_all_with_eager_relationships(&request).await?
    } else {
        entries.find_all(&request).await?
    };

    let mut base_url = format!("/api/entries?eagerload={}", params.eagerload);
    if let Some(sort) = &request.sort {
        base_url.push_str("&sort=");
        base_url.push_str(&sort.to_param());
    }
    let pagination = headers::pagination(&page, &base_url);

    Ok((pagination, Json(page.content)))
}

/// GET /api/entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    Ok(wrap_or_not_found(state.services.entries.find_one(id).await?))
}

/// DELETE /api/entries/{id}
///
/// Answers `200` whether or not the entry existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.services.entries.delete(id).await?;
    Ok(headers::entity_deletion_alert(
        EntryDto::ENTITY_NAME,
        &id.to_string(),
    ))
}
