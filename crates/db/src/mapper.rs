//! Conversions between persisted rows and wire DTOs.
//!
//! Row → DTO copies every exposed column. DTO → input copies only the
//! writable columns: derived fields (`blog_title`, `category_name`) and the
//! server-managed id and timestamps are dropped. Relationships travel as
//! plain foreign-key ids.

use blog_core::dto::{BlogDto, CategoryDto, EntryDto, TagDto};
use blog_core::types::DbId;

use crate::models::blog::{Blog, BlogInput};
use crate::models::category::{Category, CategoryInput};
use crate::models::entry::{Entry, EntryInput, EntryWithTags};
use crate::models::tag::{EntryTag, Tag, TagInput};

impl From<Blog> for BlogDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: Some(blog.id),
            title: blog.title,
            description: blog.description,
        }
    }
}

impl From<&BlogDto> for BlogInput {
    fn from(dto: &BlogDto) -> Self {
        Self {
            title: dto.title.clone(),
            description: dto.description.clone(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name,
        }
    }
}

impl From<&CategoryDto> for CategoryInput {
    fn from(dto: &CategoryDto) -> Self {
        Self {
            name: dto.name.clone(),
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: Some(tag.id),
            name: tag.name,
        }
    }
}

impl From<&TagDto> for TagInput {
    fn from(dto: &TagDto) -> Self {
        Self {
            name: dto.name.clone(),
        }
    }
}

impl From<EntryTag> for TagDto {
    fn from(tag: EntryTag) -> Self {
        Self {
            id: Some(tag.tag_id),
            name: tag.name,
        }
    }
}

/// An entry whose tags were not loaded; `tags` stays `None`.
impl From<Entry> for EntryDto {
    fn from(entry: Entry) -> Self {
        Self {
            id: Some(entry.id),
            title: entry.title,
            description: entry.description,
            published: entry.published,
            tags: None,
            blog_id: entry.blog_id,
            blog_title: entry.blog_title,
            category_id: entry.category_id,
            category_name: entry.category_name,
        }
    }
}

impl From<EntryWithTags> for EntryDto {
    fn from(loaded: EntryWithTags) -> Self {
        let tags = loaded.tags.into_iter().map(TagDto::from).collect();
        Self {
            tags: Some(tags),
            ..EntryDto::from(loaded.entry)
        }
    }
}

impl From<&EntryDto> for EntryInput {
    fn from(dto: &EntryDto) -> Self {
        Self {
            title: dto.title.clone(),
            description: dto.description.clone(),
            published: dto.published,
            blog_id: dto.blog_id,
            category_id: dto.category_id,
            tag_ids: dto.tags.as_deref().map(tag_ids),
        }
    }
}

/// Distinct ids of the given tags, ascending. Tags without an id are skipped.
pub fn tag_ids(tags: &[TagDto]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = tags.iter().filter_map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
