use std::sync::Arc;

use blog_core::dto::EntryDto;
use blog_core::error::CoreError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::types::DbId;
use blog_db::mapper;
use blog_db::models::entry::EntryInput;
use blog_db::repositories::{
    BlogRepository, CategoryRepository, EntryRepository, Repositories, TagRepository,
};

use crate::error::{AppError, AppResult};

/// Entry operations. Holds the blog, category and tag repositories as well
/// so references can be checked before writing.
#[derive(Clone)]
pub struct EntryService {
    entries: Arc<dyn EntryRepository>,
    blogs: Arc<dyn BlogRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
}

impl EntryService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            entries: repos.entries.clone(),
            blogs: repos.blogs.clone(),
            categories: repos.categories.clone(),
            tags: repos.tags.clone(),
        }
    }

    /// Insert when `dto.id` is `None`, otherwise overwrite the entry with
    /// that id. Returns the stored entry with its tags loaded.
    ///
    /// `dto.tags: None` keeps the current tag links on update.
    pub async fn save(&self, dto: &EntryDto) -> AppResult<EntryDto> {
        tracing::debug!(id = ?dto.id, "Saving entry");
        self.check_references(dto).await?;

        let input = EntryInput::from(dto);
        let id = match dto.id {
            None => self.entries.insert(&input).await?.id,
            Some(id) => {
                self.entries
                    .update(id, &input)
                    .await?
                    .ok_or(AppError::Core(CoreError::NotFound {
                        entity: "Entry",
                        id,
                    }))?
                    .id
            }
        };

        self.entries
            .find_by_id_with_tags(id)
            .await?
            .map(EntryDto::from)
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))
    }

    /// One page of entries without their tags.
    pub async fn find_all(&self, request: &PageRequest) -> AppResult<Page<EntryDto>> {
        tracing::debug!(page = request.page, size = request.size, "Listing entries");
        let page = self.entries.page(request).await?;
        Ok(page.map(EntryDto::from))
    }

    /// One page of entries with tags loaded.
    pub async fn find_all_with_eager_relationships(
        &self,
        request: &PageRequest,
    ) -> AppResult<Page<EntryDto>> {
        tracing::debug!(
            page = request.page,
            size = request.size,
            "Listing entries with tags"
        );
        let page = self.entries.page_with_tags(request).await?;
        Ok(page.map(EntryDto::from))
    }

    /// Find an entry with its tags loaded.
    pub async fn find_one(&self, id: DbId) -> AppResult<Option<EntryDto>> {
        tracing::debug!(id, "Fetching entry");
        Ok(self
            .entries
            .find_by_id_with_tags(id)
            .await?
            .map(EntryDto::from))
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let removed = self.entries.delete(id).await?;
        tracing::debug!(id, removed, "Deleted entry");
        Ok(())
    }

    /// Referenced blog, category and tags must already exist.
    async fn check_references(&self, dto: &EntryDto) -> AppResult<()> {
        if let Some(blog_id) = dto.blog_id {
            if self.blogs.find_by_id(blog_id).await?.is_none() {
                return Err(CoreError::Validation(format!("Blog {blog_id} does not exist")).into());
            }
        }

        if let Some(category_id) = dto.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(CoreError::Validation(format!(
                    "Category {category_id} does not exist"
                ))
                .into());
            }
        }

        if let Some(tags) = &dto.tags {
            if tags.iter().any(|t| t.id.is_none()) {
                return Err(CoreError::Validation(
                    "Tags must reference existing tags by id".into(),
                )
                .into());
            }
            let ids = mapper::tag_ids(tags);
            let found = self.tags.find_by_ids(&ids).await?;
            if found.len() != ids.len() {
                let missing: Vec<String> = ids
                    .iter()
                    .filter(|id| !found.iter().any(|t| t.id == **id))
                    .map(ToString::to_string)
                    .collect();
                return Err(CoreError::Validation(format!(
                    "Unknown tag ids: {}",
                    missing.join(", ")
                ))
                .into());
            }
        }

        Ok(())
    }
}
