use std::sync::Arc;

use blog_core::dto::BlogDto;
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::blog::BlogInput;
use blog_db::repositories::BlogRepository;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// Insert when `dto.id` is `None`, otherwise overwrite the blog with
    /// that id. Child entries are never written through a blog.
    pub async fn save(&self, dto: &BlogDto) -> AppResult<BlogDto> {
        tracing::debug!(id = ?dto.id, "Saving blog");
        let input = BlogInput::from(dto);
        match dto.id {
            None => Ok(self.repo.insert(&input).await?.into()),
            Some(id) => self
                .repo
                .update(id, &input)
                .await?
                .map(BlogDto::from)
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id })),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<BlogDto>> {
        tracing::debug!("Listing blogs");
        let blogs = self.repo.list().await?;
        Ok(blogs.into_iter().map(BlogDto::from).collect())
    }

    pub async fn find_one(&self, id: DbId) -> AppResult<Option<BlogDto>> {
        tracing::debug!(id, "Fetching blog");
        Ok(self.repo.find_by_id(id).await?.map(BlogDto::from))
    }

    /// Delete a blog if it exists. Its entries stay, detached.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let removed = self.repo.delete(id).await?;
        tracing::debug!(id, removed, "Deleted blog");
        Ok(())
    }
}
