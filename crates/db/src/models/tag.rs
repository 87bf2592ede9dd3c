//! Tag and entry-tag models.

use blog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagInput {
    pub name: String,
}

/// A tag attached to an entry, as read from the `entry_tags` junction.
/// Carries only what the entry DTO needs.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct EntryTag {
    pub entry_id: DbId,
    pub tag_id: DbId,
    pub name: String,
}
