//! Repository tests against a real PostgreSQL database.
//!
//! Requires `DATABASE_URL`; `sqlx::test` creates a fresh database per test
//! and applies `db/migrations`.

use blog_core::pagination::PageRequest;
use blog_db::models::blog::BlogInput;
use blog_db::models::category::CategoryInput;
use blog_db::models::entry::{EntryInput, SORTABLE};
use blog_db::models::tag::TagInput;
use blog_db::repositories::Repositories;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_blog(title: &str) -> BlogInput {
    BlogInput {
        title: title.to_string(),
        description: None,
    }
}

fn new_entry(title: &str) -> EntryInput {
    EntryInput {
        title: title.to_string(),
        description: None,
        published: false,
        blog_id: None,
        category_id: None,
        tag_ids: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap(pool: PgPool) {
    blog_db::health_check(&pool).await.unwrap();

    for table in ["blogs", "entries", "categories", "tags", "entry_tags"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blog_crud(pool: PgPool) {
    let repos = Repositories::postgres(pool);

    let blog = repos.blogs.insert(&new_blog("First")).await.unwrap();
    assert_eq!(blog.title, "First");

    let updated = repos
        .blogs
        .update(blog.id, &new_blog("Renamed"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Renamed");

    assert_eq!(repos.blogs.list().await.unwrap().len(), 1);
    assert!(repos.blogs.delete(blog.id).await.unwrap());
    assert!(!repos.blogs.delete(blog.id).await.unwrap());
    assert!(repos.blogs.find_by_id(blog.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entry_joins_blog_and_category(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let blog = repos.blogs.insert(&new_blog("Journal")).await.unwrap();
    let category = repos
        .categories
        .insert(&CategoryInput {
            name: "Travel".into(),
        })
        .await
        .unwrap();

    let entry = repos
        .entries
        .insert(&EntryInput {
            blog_id: Some(blog.id),
            category_id: Some(category.id),
            ..new_entry("Lisbon")
        })
        .await
        .unwrap();

    assert_eq!(entry.blog_title.as_deref(), Some("Journal"));
    assert_eq!(entry.category_name.as_deref(), Some("Travel"));

    // Deleting the blog sets the reference to NULL.
    repos.blogs.delete(blog.id).await.unwrap();
    let entry = repos.entries.find_by_id(entry.id).await.unwrap().unwrap();
    assert_eq!(entry.blog_id, None);
    assert_eq!(entry.category_name.as_deref(), Some("Travel"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entry_tags_replace_and_cascade(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let a = repos.tags.insert(&TagInput { name: "a".into() }).await.unwrap();
    let b = repos.tags.insert(&TagInput { name: "b".into() }).await.unwrap();

    let entry = repos
        .entries
        .insert(&EntryInput {
            tag_ids: Some(vec![a.id, b.id]),
            ..new_entry("Tagged")
        })
        .await
        .unwrap();
    let loaded = repos
        .entries
        .find_by_id_with_tags(entry.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.tags.len(), 2);

    repos
        .entries
        .update(
            entry.id,
            &EntryInput {
                tag_ids: Some(vec![a.id]),
                ..new_entry("Tagged")
            },
        )
        .await
        .unwrap()
        .unwrap();
    let tags = repos.entries.tags_for_entries(&[entry.id]).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "a");

    repos.tags.delete(a.id).await.unwrap();
    let tags = repos.entries.tags_for_entries(&[entry.id]).await.unwrap();
    assert!(tags.is_empty());

    assert!(repos.entries.delete(entry.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entry_paging_and_sorting(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    for title in ["c", "a", "b"] {
        repos.entries.insert(&new_entry(title)).await.unwrap();
    }

    let request = PageRequest::parse(Some(0), Some(2), Some("title,asc"), SORTABLE).unwrap();
    let page = repos.entries.page(&request).await.unwrap();
    assert_eq!(page.total_elements, 3);
    let titles: Vec<_> = page.content.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["a", "b"]);

    let request = PageRequest::parse(Some(1), Some(2), Some("title,asc"), SORTABLE).unwrap();
    let page = repos.entries.page_with_tags(&request).await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].entry.title, "c");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_entry_returns_none(pool: PgPool) {
    let repos = Repositories::postgres(pool);
    let result = repos.entries.update(999_999, &new_entry("x")).await.unwrap();
    assert!(result.is_none());
}
