//! Wire representations of the blog resources.
//!
//! Each DTO carries an optional identifier plus scalar fields. Identifiers
//! are assigned by the persistence layer, so a DTO for a record that has
//! not been created yet has `id: None`. Relationship collections are never
//! written through a parent's DTO: a blog carries no entries, and an entry
//! references its blog and category by id only.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// A resource exposed over the REST API.
///
/// `ENTITY_NAME` is the lowercase name used in alert headers and
/// client-error payloads (e.g. `"entry"`).
pub trait Resource {
    const ENTITY_NAME: &'static str;

    /// Identifier carried by the payload, if any.
    fn id(&self) -> Option<DbId>;
}

/// A blog, the aggregate root that entries belong to.
///
/// Unknown fields are ignored on input, so an `entries` array sent by a
/// client is dropped rather than written through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BlogDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for BlogDto {
    const ENTITY_NAME: &'static str = "blog";

    fn id(&self) -> Option<DbId> {
        self.id
    }
}

/// A blog entry.
///
/// `blog_title` and `category_name` are derived from the referenced rows
/// and ignored on input. `tags` is `None` when tags were not loaded (lazy
/// listing); on input, `None` leaves the stored tag set untouched while
/// `Some` replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EntryDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagDto>>,
    #[serde(default)]
    pub blog_id: Option<DbId>,
    #[serde(default)]
    pub blog_title: Option<String>,
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Resource for EntryDto {
    const ENTITY_NAME: &'static str = "entry";

    fn id(&self) -> Option<DbId> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl Resource for CategoryDto {
    const ENTITY_NAME: &'static str = "category";

    fn id(&self) -> Option<DbId> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TagDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

impl Resource for TagDto {
    const ENTITY_NAME: &'static str = "tag";

    fn id(&self) -> Option<DbId> {
        self.id
    }
}
