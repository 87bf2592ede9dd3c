//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::dto::{CategoryDto, Resource};
use blog_core::types::DbId;

use super::{ensure_new, require_id, wrap_or_not_found};
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::headers;
use crate::state::AppState;

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CategoryDto>,
) -> AppResult<impl IntoResponse> {
    ensure_new(&dto)?;
    let category = state.services.categories.save(&dto).await?;
    let id = category.id.unwrap_or_default().to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/categories/{id}"))],
        headers::entity_creation_alert(CategoryDto::ENTITY_NAME, &id),
        Json(category),
    ))
}

/// PUT /api/categories
pub async fn update(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CategoryDto>,
) -> AppResult<impl IntoResponse> {
    let id = require_id(&dto)?;
    let category = state.services.categories.save(&dto).await?;
    Ok((
        headers::entity_update_alert(CategoryDto::ENTITY_NAME, &id.to_string()),
        Json(category),
    ))
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryDto>>> {
    Ok(Json(state.services.categories.find_all().await?))
}

/// GET /api/categories/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    Ok(wrap_or_not_found(state.services.categories.find_one(id).await?))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.services.categories.delete(id).await?;
    Ok(headers::entity_deletion_alert(
        CategoryDto::ENTITY_NAME,
        &id.to_string(),
    ))
}
