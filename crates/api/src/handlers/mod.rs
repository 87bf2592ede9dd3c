//! Request handlers, one submodule per resource.
//!
//! Each submodule provides `create`, `update`, `list`, `get_by_id` and
//! `delete`. Handlers check the id invariants of the request body, delegate
//! to the resource's service and attach alert headers to the response.

pub mod blog;
pub mod category;
pub mod entry;
pub mod tag;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blog_core::dto::Resource;
use blog_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// A create request must not carry an id.
pub(crate) fn ensure_new<T: Resource>(dto: &T) -> AppResult<()> {
    match dto.id() {
        None => Ok(()),
        Some(_) => Err(AppError::bad_request_alert(
            format!("A new {} cannot already have an ID", T::ENTITY_NAME),
            T::ENTITY_NAME,
            "idexists",
        )),
    }
}

/// An update request must carry the id of the record to overwrite.
pub(crate) fn require_id<T: Resource>(dto: &T) -> AppResult<DbId> {
    dto.id()
        .ok_or_else(|| AppError::bad_request_alert("Invalid id", T::ENTITY_NAME, "idnull"))
}

/// `200` with the body when present, otherwise `404` with an empty body.
pub(crate) fn wrap_or_not_found<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
