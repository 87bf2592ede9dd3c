//! Service layer, one service per resource.
//!
//! Services turn DTOs into repository inputs and back, decide between
//! insert and update on `save`, and check that referenced records exist.
//! Handlers never touch the repositories directly.

pub mod blog;
pub mod category;
pub mod entry;
pub mod tag;

use blog_db::repositories::Repositories;

pub use blog::BlogService;
pub use category::CategoryService;
pub use entry::EntryService;
pub use tag::TagService;

/// Every resource service, built once from the repository bundle.
#[derive(Clone)]
pub struct Services {
    pub blogs: BlogService,
    pub entries: EntryService,
    pub categories: CategoryService,
    pub tags: TagService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            blogs: BlogService::new(repos.blogs.clone()),
            entries: EntryService::new(repos),
            categories: CategoryService::new(repos.categories.clone()),
            tags: TagService::new(repos.tags.clone()),
        }
    }
}
