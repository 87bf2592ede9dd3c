//! In-memory implementation of every repository trait.
//!
//! All tables live behind one [`RwLock`] so cross-table effects (clearing
//! `blog_id` when a blog is deleted, dropping tag links) happen atomically,
//! mirroring the foreign-key actions of the PostgreSQL schema. Ids are
//! assigned from per-table sequences starting at 1.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use blog_core::pagination::{Direction, Page, PageRequest, Sort};
use blog_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{BlogRepository, CategoryRepository, EntryRepository, RepoResult, TagRepository};
use crate::models::blog::{Blog, BlogInput};
use crate::models::category::{Category, CategoryInput};
use crate::models::entry::{Entry, EntryInput};
use crate::models::tag::{EntryTag, Tag, TagInput};

/// An entry as stored, without the joined blog title and category name.
#[derive(Debug, Clone)]
struct EntryRecord {
    id: DbId,
    title: String,
    description: Option<String>,
    published: bool,
    blog_id: Option<DbId>,
    category_id: Option<DbId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Default)]
struct Sequence(DbId);

impl Sequence {
    fn next(&mut self) -> DbId {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    blogs: BTreeMap<DbId, Blog>,
    categories: BTreeMap<DbId, Category>,
    tags: BTreeMap<DbId, Tag>,
    entries: BTreeMap<DbId, EntryRecord>,
    /// `(entry_id, tag_id)` pairs.
    entry_tags: BTreeSet<(DbId, DbId)>,
    blog_seq: Sequence,
    category_seq: Sequence,
    tag_seq: Sequence,
    entry_seq: Sequence,
}

impl Tables {
    fn joined(&self, record: &EntryRecord) -> Entry {
        Entry {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            published: record.published,
            blog_id: record.blog_id,
            blog_title: record
                .blog_id
                .and_then(|id| self.blogs.get(&id))
                .map(|b| b.title.clone()),
            category_id: record.category_id,
            category_name: record
                .category_id
                .and_then(|id| self.categories.get(&id))
                .map(|c| c.name.clone()),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn replace_tags(&mut self, entry_id: DbId, tag_ids: &[DbId]) {
        self.entry_tags.retain(|(e, _)| *e != entry_id);
        for tag_id in tag_ids {
            if self.tags.contains_key(tag_id) {
                self.entry_tags.insert((entry_id, *tag_id));
            }
        }
    }
}

/// Process-local storage for all tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> Timestamp {
    chrono::Utc::now()
}

fn compare_entries(a: &Entry, b: &Entry, sort: Option<&Sort>) -> Ordering {
    let Some(sort) = sort else {
        return a.id.cmp(&b.id);
    };
    let primary = match sort.property.as_str() {
        "title" => a.title.cmp(&b.title),
        "published" => a.published.cmp(&b.published),
        "blog_id" => a.blog_id.cmp(&b.blog_id),
        "category_id" => a.category_id.cmp(&b.category_id),
        _ => a.id.cmp(&b.id),
    };
    let primary = match sort.direction {
        Direction::Asc => primary,
        Direction::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn insert(&self, input: &BlogInput) -> RepoResult<Blog> {
        let mut tables = self.tables.write().await;
        let id = tables.blog_seq.next();
        let ts = now();
        let blog = Blog {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            created_at: ts,
            updated_at: ts,
        };
        tables.blogs.insert(id, blog.clone());
        Ok(blog)
    }

    async fn update(&self, id: DbId, input: &BlogInput) -> RepoResult<Option<Blog>> {
        let mut tables = self.tables.write().await;
        Ok(tables.blogs.get_mut(&id).map(|blog| {
            blog.title = input.title.clone();
            blog.description = input.description.clone();
            blog.updated_at = now();
            blog.clone()
        }))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Blog>> {
        Ok(self.tables.read().await.blogs.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Blog>> {
        Ok(self.tables.read().await.blogs.values().cloned().collect())
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.blogs.remove(&id).is_none() {
            return Ok(false);
        }
        for entry in tables.entries.values_mut() {
            if entry.blog_id == Some(id) {
                entry.blog_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert(&self, input: &CategoryInput) -> RepoResult<Category> {
        let mut tables = self.tables.write().await;
        let id = tables.category_seq.next();
        let ts = now();
        let category = Category {
            id,
            name: input.name.clone(),
            created_at: ts,
            updated_at: ts,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: DbId, input: &CategoryInput) -> RepoResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.get_mut(&id).map(|category| {
            category.name = input.name.clone();
            category.updated_at = now();
            category.clone()
        }))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for entry in tables.entries.values_mut() {
            if entry.category_id == Some(id) {
                entry.category_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn insert(&self, input: &TagInput) -> RepoResult<Tag> {
        let mut tables = self.tables.write().await;
        let id = tables.tag_seq.next();
        let ts = now();
        let tag = Tag {
            id,
            name: input.name.clone(),
            created_at: ts,
            updated_at: ts,
        };
        tables.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn update(&self, id: DbId, input: &TagInput) -> RepoResult<Option<Tag>> {
        let mut tables = self.tables.write().await;
        Ok(tables.tags.get_mut(&id).map(|tag| {
            tag.name = input.name.clone();
            tag.updated_at = now();
            tag.clone()
        }))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Tag>> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[DbId]) -> RepoResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .values()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Tag>> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Ok(false);
        }
        tables.entry_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(true)
    }
}

#[async_trait]
impl EntryRepository for MemoryStore {
    async fn insert(&self, input: &EntryInput) -> RepoResult<Entry> {
        let mut tables = self.tables.write().await;
        let id = tables.entry_seq.next();
        let ts = now();
        let record = EntryRecord {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            published: input.published,
            blog_id: input.blog_id,
            category_id: input.category_id,
            created_at: ts,
            updated_at: ts,
        };
        if let Some(tag_ids) = &input.tag_ids {
            tables.replace_tags(id, tag_ids);
        }
        let entry = tables.joined(&record);
        tables.entries.insert(id, record);
        Ok(entry)
    }

    async fn update(&self, id: DbId, input: &EntryInput) -> RepoResult<Option<Entry>> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.entries.get_mut(&id) else {
            return Ok(None);
        };
        record.title = input.title.clone();
        record.description = input.description.clone();
        record.published = input.published;
        record.blog_id = input.blog_id;
        record.category_id = input.category_id;
        record.updated_at = now();
        let record = record.clone();

        if let Some(tag_ids) = &input.tag_ids {
            tables.replace_tags(id, tag_ids);
        }
        Ok(Some(tables.joined(&record)))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Entry>> {
        let tables = self.tables.read().await;
        Ok(tables.entries.get(&id).map(|r| tables.joined(r)))
    }

    async fn page(&self, request: &PageRequest) -> RepoResult<Page<Entry>> {
        let tables = self.tables.read().await;
        let mut all: Vec<Entry> = tables.entries.values().map(|r| tables.joined(r)).collect();
        all.sort_by(|a, b| compare_entries(a, b, request.sort.as_ref()));

        let total = i64::try_from(all.len()).unwrap_or(i64::MAX);
        let content = all
            .into_iter()
            .skip(to_usize(request.offset()))
            .take(to_usize(request.size))
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn tags_for_entries(&self, entry_ids: &[DbId]) -> RepoResult<Vec<EntryTag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .entry_tags
            .iter()
            .filter(|(entry_id, _)| entry_ids.contains(entry_id))
            .filter_map(|(entry_id, tag_id)| {
                tables.tags.get(tag_id).map(|tag| EntryTag {
                    entry_id: *entry_id,
                    tag_id: tag.id,
                    name: tag.name.clone(),
                })
            })
            .collect())
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.entries.remove(&id).is_none() {
            return Ok(false);
        }
        tables.entry_tags.retain(|(entry_id, _)| *entry_id != id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::repositories::Repositories;

    fn entry_input(title: &str) -> EntryInput {
        EntryInput {
            title: title.to_string(),
            description: None,
            published: false,
            blog_id: None,
            category_id: None,
            tag_ids: None,
        }
    }

    fn page(page: i64, size: i64, sort: Option<&str>) -> PageRequest {
        PageRequest::parse(Some(page), Some(size), sort, crate::models::entry::SORTABLE).unwrap()
    }

    #[tokio::test]
    async fn ids_are_assigned_per_table() {
        let repos = Repositories::in_memory();
        let blog = repos
            .blogs
            .insert(&BlogInput {
                title: "b".into(),
                description: None,
            })
            .await
            .unwrap();
        let first = repos.entries.insert(&entry_input("one")).await.unwrap();
        let second = repos.entries.insert(&entry_input("two")).await.unwrap();

        assert_eq!(blog.id, 1);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn entry_is_joined_with_blog_and_category() {
        let repos = Repositories::in_memory();
        let blog = repos
            .blogs
            .insert(&BlogInput {
                title: "Rust notes".into(),
                description: None,
            })
            .await
            .unwrap();
        let category = repos
            .categories
            .insert(&CategoryInput { name: "lang".into() })
            .await
            .unwrap();

        let entry = repos
            .entries
            .insert(&EntryInput {
                blog_id: Some(blog.id),
                category_id: Some(category.id),
                ..entry_input("Ownership")
            })
            .await
            .unwrap();

        assert_eq!(entry.blog_title.as_deref(), Some("Rust notes"));
        assert_eq!(entry.category_name.as_deref(), Some("lang"));
    }

    #[tokio::test]
    async fn deleting_blog_clears_reference() {
        let repos = Repositories::in_memory();
        let blog = repos
            .blogs
            .insert(&BlogInput {
                title: "gone".into(),
                description: None,
            })
            .await
            .unwrap();
        let entry = repos
            .entries
            .insert(&EntryInput {
                blog_id: Some(blog.id),
                ..entry_input("orphan")
            })
            .await
            .unwrap();

        assert!(repos.blogs.delete(blog.id).await.unwrap());
        let entry = repos.entries.find_by_id(entry.id).await.unwrap().unwrap();
        assert_eq!(entry.blog_id, None);
        assert_eq!(entry.blog_title, None);
    }

    #[tokio::test]
    async fn tag_links_follow_replace_semantics() {
        let repos = Repositories::in_memory();
        let a = repos.tags.insert(&TagInput { name: "a".into() }).await.unwrap();
        let b = repos.tags.insert(&TagInput { name: "b".into() }).await.unwrap();

        let entry = repos
            .entries
            .insert(&EntryInput {
                tag_ids: Some(vec![a.id, b.id]),
                ..entry_input("tagged")
            })
            .await
            .unwrap();
        let loaded = repos.entries.find_by_id_with_tags(entry.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags.len(), 2);

        // `None` keeps the links.
        repos
            .entries
            .update(entry.id, &entry_input("renamed"))
            .await
            .unwrap();
        let loaded = repos.entries.find_by_id_with_tags(entry.id).await.unwrap().unwrap();
        assert_eq!(loaded.entry.title, "renamed");
        assert_eq!(loaded.tags.len(), 2);

        // `Some` replaces them.
        repos
            .entries
            .update(
                entry.id,
                &EntryInput {
                    tag_ids: Some(vec![b.id]),
                    ..entry_input("renamed")
                },
            )
            .await
            .unwrap();
        let loaded = repos.entries.find_by_id_with_tags(entry.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags.len(), 1);
        assert_eq!(loaded.tags[0].name, "b");

        // Deleting the tag detaches it.
        repos.tags.delete(b.id).await.unwrap();
        let loaded = repos.entries.find_by_id_with_tags(entry.id).await.unwrap().unwrap();
        assert!(loaded.tags.is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none() {
        let repos = Repositories::in_memory();
        assert_matches!(repos.entries.update(42, &entry_input("x")).await, Ok(None));
        assert_matches!(repos.entries.delete(42).await, Ok(false));
    }

    #[tokio::test]
    async fn page_slices_and_counts() {
        let repos = Repositories::in_memory();
        for title in ["c", "a", "e", "b", "d"] {
            repos.entries.insert(&entry_input(title)).await.unwrap();
        }

        let first = repos.entries.page(&page(0, 2, None)).await.unwrap();
        assert_eq!(first.total_elements, 5);
        assert_eq!(first.total_pages(), 3);
        let titles: Vec<_> = first.content.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["c", "a"]);

        let sorted = repos.entries.page(&page(1, 2, Some("title,desc"))).await.unwrap();
        let titles: Vec<_> = sorted.content.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["c", "b"]);

        let beyond = repos.entries.page(&page(9, 2, None)).await.unwrap();
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 5);
    }

    #[tokio::test]
    async fn page_with_tags_groups_by_entry() {
        let store = Arc::new(MemoryStore::new());
        let repos = Repositories {
            blogs: store.clone(),
            entries: store.clone(),
            categories: store.clone(),
            tags: store,
        };
        let tag = repos.tags.insert(&TagInput { name: "t".into() }).await.unwrap();
        repos
            .entries
            .insert(&EntryInput {
                tag_ids: Some(vec![tag.id, tag.id]),
                ..entry_input("with")
            })
            .await
            .unwrap();
        repos.entries.insert(&entry_input("without")).await.unwrap();

        let result = repos.entries.page_with_tags(&page(0, 20, None)).await.unwrap();
        assert_eq!(result.content.len(), 2);
        assert_eq!(result.content[0].tags.len(), 1);
        assert!(result.content[1].tags.is_empty());
    }
}
