//! Handlers for the `/tags` resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::dto::{Resource, TagDto};
use blog_core::types::DbId;

use super::{ensure_new, require_id, wrap_or_not_found};
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::headers;
use crate::state::AppState;

/// POST /api/tags
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<TagDto>,
) -> AppResult<impl IntoResponse> {
    ensure_new(&dto)?;
    let tag = state.services.tags.save(&dto).await?;
    let id = tag.id.unwrap_or_default().to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/tags/{id}"))],
        headers::entity_creation_alert(TagDto::ENTITY_NAME, &id),
        Json(tag),
    ))
}

/// PUT /api/tags
pub async fn update(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<TagDto>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(&dto)?;
    let tag = state.services.tags.save(&dto).await?;
    Ok((
        headers::entity_update_alert(TagDto::ENTITY_NAME, &id.to_string()),
        Json(tag),
    ))
}

/// GET /api/tags
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TagDto>>> {
    Ok(Json(state.services.tags.find_all().await?))
}

/// GET /api/tags/{id}
///
/// Unknown ids answer `404` with an empty body.
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    Ok(wrap_or_not_found(state.services.tags.find_one(id).await?))
}

/// DELETE /api/tags/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.services.tags.delete(id).await?;
    Ok(headers::entity_deletion_alert(
        TagDto::ENTITY_NAME,
        &id.to_string(),
    ))
}
