//! Entry entity model.

use blog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::EntryTag;

/// Properties entries can be ordered by in paged listings.
pub const SORTABLE: &[&str] = &["id", "title", "published", "blog_id", "category_id"];

/// A row from the `entries` table, joined with the referenced blog title
/// and category name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub blog_id: Option<DbId>,
    pub blog_title: Option<String>,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An entry together with its eagerly loaded tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryWithTags {
    pub entry: Entry,
    pub tags: Vec<EntryTag>,
}

/// Writable columns of an entry.
///
/// `tag_ids: None` leaves the stored tag links untouched; `Some` replaces
/// them with exactly the given set.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub blog_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub tag_ids: Option<Vec<DbId>>,
}
