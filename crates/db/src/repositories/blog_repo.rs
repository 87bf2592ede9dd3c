//! PostgreSQL repository for the `blogs` table.

use async_trait::async_trait;
use blog_core::types::DbId;
use sqlx::PgPool;

use super::{BlogRepository, RepoResult};
use crate::models::blog::{Blog, BlogInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, created_at, updated_at";

pub struct BlogRepo {
    pool: PgPool,
}

impl BlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for BlogRepo {
    async fn insert(&self, input: &BlogInput) -> RepoResult<Blog> {
        let query = format!(
            "INSERT INTO blogs (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: DbId, input: &BlogInput) -> RepoResult<Option<Blog>> {
        let query = format!(
            "UPDATE blogs SET title = $2, description = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Blog>> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list(&self) -> RepoResult<Vec<Blog>> {
        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY id");
        sqlx::query_as::<_, Blog>(&query).fetch_all(&self.pool).await
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
