//! PostgreSQL repository for the `entries` table and its `entry_tags` links.

use async_trait::async_trait;
use blog_core::pagination::{Page, PageRequest, Sort};
use blog_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::{EntryRepository, RepoResult};
use crate::models::entry::{Entry, EntryInput};
use crate::models::tag::EntryTag;

/// Entry columns joined with the referenced blog title and category name.
const SELECT_JOINED: &str = "SELECT e.id, e.title, e.description, e.published,
        e.blog_id, b.title AS blog_title,
        e.category_id, c.name AS category_name,
        e.created_at, e.updated_at
     FROM entries e
     LEFT JOIN blogs b ON b.id = e.blog_id
     LEFT JOIN categories c ON c.id = e.category_id";

pub struct EntryRepo {
    pool: PgPool,
}

impl EntryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sortable property to its column. Unknown properties yield `None`.
fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "id" => Some("e.id"),
        "title" => Some("e.title"),
        "published" => Some("e.published"),
        "blog_id" => Some("e.blog_id"),
        "category_id" => Some("e.category_id"),
        _ => None,
    }
}

/// Build the ORDER BY clause. Always ends with `e.id` so paging is stable.
fn order_by(sort: Option<&Sort>) -> String {
    match sort.and_then(|s| sort_column(&s.property).map(|col| (col, s.direction))) {
        Some(("e.id", direction)) => format!("e.id {}", direction.as_sql()),
        Some((col, direction)) => format!("{col} {}, e.id ASC", direction.as_sql()),
        None => "e.id ASC".to_string(),
    }
}

async fn fetch_joined(conn: &mut PgConnection, id: DbId) -> RepoResult<Option<Entry>> {
    let query = format!("{SELECT_JOINED} WHERE e.id = $1");
    sqlx::query_as::<_, Entry>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Replace the tag links of `entry_id` with exactly `tag_ids`.
async fn replace_tags(conn: &mut PgConnection, entry_id: DbId, tag_ids: &[DbId]) -> RepoResult<()> {
    sqlx::query("DELETE FROM entry_tags WHERE entry_id = $1")
        .bind(entry_id)
        .execute(&mut *conn)
        .await?;

    if !tag_ids.is_empty() {
        sqlx::query(
            "INSERT INTO entry_tags (entry_id, tag_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT ON CONSTRAINT uq_entry_tags_entry_tag DO NOTHING",
        )
        .bind(entry_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl EntryRepository for EntryRepo {
    async fn insert(&self, input: &EntryInput) -> RepoResult<Entry> {
        let mut tx = self.pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO entries (title, description, published, blog_id, category_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.published)
        .bind(input.blog_id)
        .bind(input.category_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tag_ids) = &input.tag_ids {
            replace_tags(&mut tx, id, tag_ids).await?;
        }

        let entry = fetch_joined(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(entry)
    }

    async fn update(&self, id: DbId, input: &EntryInput) -> RepoResult<Option<Entry>> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE entries SET
                title = $2,
                description = $3,
                published = $4,
                blog_id = $5,
                category_id = $6
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.published)
        .bind(input.blog_id)
        .bind(input.category_id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(tag_ids) = &input.tag_ids {
            replace_tags(&mut tx, id, tag_ids).await?;
        }

        let entry = fetch_joined(&mut tx, id).await?;
        tx.commit().await?;
        Ok(entry)
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Entry>> {
        let query = format!("{SELECT_JOINED} WHERE e.id = $1");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn page(&self, request: &PageRequest) -> RepoResult<Page<Entry>> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{SELECT_JOINED} ORDER BY {} LIMIT $1 OFFSET $2",
            order_by(request.sort.as_ref())
        );
        let content = sqlx::query_as::<_, Entry>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(content, request, total))
    }

    async fn tags_for_entries(&self, entry_ids: &[DbId]) -> RepoResult<Vec<EntryTag>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, EntryTag>(
            "SELECT et.entry_id, t.id AS tag_id, t.name
             FROM entry_tags et
             JOIN tags t ON t.id = et.tag_id
             WHERE et.entry_id = ANY($1)
             ORDER BY et.entry_id, t.id",
        )
        .bind(entry_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Tag links are removed by `ON DELETE CASCADE`.
    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use blog_core::pagination::Direction;

    use super::*;

    fn sort(property: &str, direction: Direction) -> Sort {
        Sort {
            property: property.to_string(),
            direction,
        }
    }

    #[test]
    fn order_defaults_to_id() {
        assert_eq!(order_by(None), "e.id ASC");
    }

    #[test]
    fn order_by_property_adds_id_tiebreak() {
        assert_eq!(
            order_by(Some(&sort("title", Direction::Desc))),
            "e.title DESC, e.id ASC"
        );
    }

    #[test]
    fn order_by_id_honours_direction() {
        assert_eq!(order_by(Some(&sort("id", Direction::Desc))), "e.id DESC");
    }

    #[test]
    fn unknown_property_falls_back_to_id() {
        assert_eq!(order_by(Some(&sort("e.id; DROP TABLE entries", Direction::Asc))), "e.id ASC");
    }
}
