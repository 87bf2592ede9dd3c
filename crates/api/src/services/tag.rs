use std::sync::Arc;

use blog_core::dto::TagDto;
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::tag::TagInput;
use blog_db::repositories::TagRepository;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct TagService {
    repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(repo: Arc<dyn TagRepository>) -> Self {
        Self { repo }
    }

    pub async fn save(&self, dto: &TagDto) -> AppResult<TagDto> {
        tracing::debug!(id = ?dto.id, "Saving tag");
        let input = TagInput::from(dto);
        match dto.id {
            None => Ok(self.repo.insert(&input).await?.into()),
            Some(id) => self
                .repo
                .update(id, &input)
                .await?
                .map(TagDto::from)
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id })),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<TagDto>> {
        tracing::debug!("Listing tags");
        let tags = self.repo.list().await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    pub async fn find_one(&self, id: DbId) -> AppResult<Option<TagDto>> {
        tracing::debug!(id, "Fetching tag");
        Ok(self.repo.find_by_id(id).await?.map(TagDto::from))
    }

    /// Delete a tag and detach it from every entry.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let removed = self.repo.delete(id).await?;
        tracing::debug!(id, removed, "Deleted tag");
        Ok(())
    }
}
