//! Blog entity model.

use blog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `blogs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writable columns of a blog.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogInput {
    pub title: String,
    pub description: Option<String>,
}
