//! Handlers for the `/blogs` resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::dto::{BlogDto, Resource};
use blog_core::types::DbId;

use super::{ensure_new, require_id, wrap_or_not_found};
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::headers;
use crate::state::AppState;

/// POST /api/blogs
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<BlogDto>,
) -> AppResult<impl IntoResponse> {
    ensure_new(&dto)?;
    let blog = state.services.blogs.save(&dto).await?;
    let id = blog.id.unwrap_or_default().to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/blogs/{id}"))],
        headers::entity_creation_alert(BlogDto::ENTITY_NAME, &id),
        Json(blog),
    ))
}

/// PUT /api/blogs
pub async fn update(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<BlogDto>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(&dto)?;
    let blog = state.services.blogs.save(&dto).await?;
    Ok((
        headers::entity_update_alert(BlogDto::ENTITY_NAME, &id.to_string()),
        Json(blog),
    ))
}

/// GET /api/blogs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<BlogDto>>> {
    Ok(Json(state.services.blogs.find_all().await?))
}

/// GET /api/blogs/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    Ok(wrap_or_not_found(state.services.blogs.find_one(id).await?))
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.services.blogs.delete(id).await?;
    Ok(headers::entity_deletion_alert(
        BlogDto::ENTITY_NAME,
        &id.to_string(),
    ))
}
