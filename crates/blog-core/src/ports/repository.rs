use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, CategorySummary, Post, SearchQuery};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. Every listing comes back newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Exact-match lookup on the unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title contains the query, ignoring case.
    async fn search_by_title(&self, query: &SearchQuery) -> Result<Vec<Post>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// All categories with their live post counts, most posts first, ties by slug.
    async fn list_with_post_counts(&self) -> Result<Vec<CategorySummary>, RepoError>;
}
