//! PostgreSQL repository for the `tags` table.

use async_trait::async_trait;
use blog_core::types::DbId;
use sqlx::PgPool;

use super::{RepoResult, TagRepository};
use crate::models::tag::{Tag, TagInput};

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct TagRepo {
    pool: PgPool,
}

impl TagRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for TagRepo {
    async fn insert(&self, input: &TagInput) -> RepoResult<Tag> {
        let query = format!("INSERT INTO tags (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
    }

    async fn update(&self, id: DbId, input: &TagInput) -> RepoResult<Option<Tag>> {
        let query = format!("UPDATE tags SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Tag>> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> RepoResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Tag>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn list(&self) -> RepoResult<Vec<Tag>> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY id");
        sqlx::query_as::<_, Tag>(&query).fetch_all(&self.pool).await
    }

    /// Links in `entry_tags` are removed by `ON DELETE CASCADE`.
    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
