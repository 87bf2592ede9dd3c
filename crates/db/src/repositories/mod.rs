//! Repository layer.
//!
//! Each table has an object-safe async trait with two implementations:
//! a PostgreSQL repository holding a [`PgPool`](sqlx::PgPool) and the shared
//! in-memory [`MemoryStore`]. [`Repositories`] bundles one trait object per
//! table and is built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use blog_core::pagination::{Page, PageRequest};
use blog_core::types::DbId;

use crate::models::blog::{Blog, BlogInput};
use crate::models::category::{Category, CategoryInput};
use crate::models::entry::{Entry, EntryInput, EntryWithTags};
use crate::models::tag::{EntryTag, Tag, TagInput};
use crate::DbPool;

pub mod blog_repo;
pub mod category_repo;
pub mod entry_repo;
pub mod memory;
pub mod tag_repo;

pub use blog_repo::BlogRepo;
pub use category_repo::CategoryRepo;
pub use entry_repo::EntryRepo;
pub use memory::MemoryStore;
pub use tag_repo::TagRepo;

pub type RepoResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new blog, returning the created row.
    async fn insert(&self, input: &BlogInput) -> RepoResult<Blog>;

    /// Overwrite a blog's columns. Returns `None` if no row has that `id`.
    async fn update(&self, id: DbId, input: &BlogInput) -> RepoResult<Option<Blog>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Blog>>;

    /// All blogs ordered by id.
    async fn list(&self) -> RepoResult<Vec<Blog>>;

    /// Delete a blog. Entries that referenced it keep existing with no blog.
    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, input: &CategoryInput) -> RepoResult<Category>;

    async fn update(&self, id: DbId, input: &CategoryInput) -> RepoResult<Option<Category>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Category>>;

    async fn list(&self) -> RepoResult<Vec<Category>>;

    async fn delete(&self, id: DbId) -> RepoResult<bool>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn insert(&self, input: &TagInput) -> RepoResult<Tag>;

    async fn update(&self, id: DbId, input: &TagInput) -> RepoResult<Option<Tag>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Tag>>;

    /// Tags whose id is in `ids`, ordered by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[DbId]) -> RepoResult<Vec<Tag>>;

    async fn list(&self) -> RepoResult<Vec<Tag>>;

    /// Delete a tag and detach it from every entry.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;
}

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry and its tag links, returning the created row.
    async fn insert(&self, input: &EntryInput) -> RepoResult<Entry>;

    /// Overwrite an entry's columns (and tag links when `tag_ids` is set).
    /// Returns `None` if no row has that `id`.
    async fn update(&self, id: DbId, input: &EntryInput) -> RepoResult<Option<Entry>>;

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Entry>>;

    /// One page of entries without their tags.
    async fn page(&self, request: &PageRequest) -> RepoResult<Page<Entry>>;

    /// Tags attached to any of `entry_ids`, ordered by entry then tag id.
    async fn tags_for_entries(&self, entry_ids: &[DbId]) -> RepoResult<Vec<EntryTag>>;

    /// Delete an entry and its tag links. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> RepoResult<bool>;

    /// Find an entry with its tags loaded.
    async fn find_by_id_with_tags(&self, id: DbId) -> RepoResult<Option<EntryWithTags>> {
        let Some(entry) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let tags = self.tags_for_entries(&[entry.id]).await?;
        Ok(Some(EntryWithTags { entry, tags }))
    }

    /// One page of entries with tags loaded by a single batched lookup
    /// instead of one query per entry.
    async fn page_with_tags(&self, request: &PageRequest) -> RepoResult<Page<EntryWithTags>> {
        let page = self.page(request).await?;
        let ids: Vec<DbId> = page.content.iter().map(|e| e.id).collect();

        let mut by_entry: HashMap<DbId, Vec<EntryTag>> = HashMap::new();
        for tag in self.tags_for_entries(&ids).await? {
            by_entry.entry(tag.entry_id).or_default().push(tag);
        }

        Ok(page.map(|entry| {
            let tags = by_entry.remove(&entry.id).unwrap_or_default();
            EntryWithTags { entry, tags }
        }))
    }
}

/// One repository per table, shared across services.
#[derive(Clone)]
pub struct Repositories {
    pub blogs: Arc<dyn BlogRepository>,
    pub entries: Arc<dyn EntryRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one connection pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            blogs: Arc::new(BlogRepo::new(pool.clone())),
            entries: Arc::new(EntryRepo::new(pool.clone())),
            categories: Arc::new(CategoryRepo::new(pool.clone())),
            tags: Arc::new(TagRepo::new(pool)),
        }
    }

    /// Repositories over a fresh, empty [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            blogs: store.clone(),
            entries: store.clone(),
            categories: store.clone(),
            tags: store,
        }
    }
}
