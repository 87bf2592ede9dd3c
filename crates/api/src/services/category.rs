use std::sync::Arc;

use blog_core::dto::CategoryDto;
use blog_core::error::CoreError;
use blog_core::types::DbId;
use blog_db::models::category::CategoryInput;
use blog_db::repositories::CategoryRepository;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn save(&self, dto: &CategoryDto) -> AppResult<CategoryDto> {
        tracing::debug!(id = ?dto.id, "Saving category");
        let input = CategoryInput::from(dto);
        match dto.id {
            None => Ok(self.repo.insert(&input).await?.into()),
            Some(id) => self
                .repo
                .update(id, &input)
                .await?
                .map(CategoryDto::from)
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Category",
                    id,
                })),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<CategoryDto>> {
        tracing::debug!("Listing categories");
        let categories = self.repo.list().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn find_one(&self, id: DbId) -> AppResult<Option<CategoryDto>> {
        tracing::debug!(id, "Fetching category");
        Ok(self.repo.find_by_id(id).await?.map(CategoryDto::from))
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let removed = self.repo.delete(id).await?;
        tracing::debug!(id, removed, "Deleted category");
        Ok(())
    }
}
