//! PostgreSQL repository for the `categories` table.

use async_trait::async_trait;
use blog_core::types::DbId;
use sqlx::PgPool;

use super::{CategoryRepository, RepoResult};
use crate::models::category::{Category, CategoryInput};

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct CategoryRepo {
    pool: PgPool,
}

impl CategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepo {
    async fn insert(&self, input: &CategoryInput) -> RepoResult<Category> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: DbId, input: &CategoryInput) -> RepoResult<Option<Category>> {
        let query = format!("UPDATE categories SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list(&self) -> RepoResult<Vec<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id");
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
