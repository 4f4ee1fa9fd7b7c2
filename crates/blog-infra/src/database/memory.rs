//! In-memory store - used when no database is configured.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Category, CategorySummary, Post, SearchQuery, Validate};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CategoryRepository, PostRepository};

#[derive(Default)]
struct BlogData {
    posts: HashMap<Uuid, Post>,
    categories: HashMap<Uuid, Category>,
}

impl BlogData {
    fn posts_where(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| {
            b.date_added
                .cmp(&a.date_added)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        posts
    }
}

/// Shared in-memory tables; hands out post and category repositories over
/// the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<BlogData>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_repository(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            data: self.data.clone(),
        }
    }

    pub fn category_repository(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            data: self.data.clone(),
        }
    }
}

fn check(entity: &impl Validate) -> Result<(), RepoError> {
    entity
        .validate()
        .map_err(|e| RepoError::Constraint(e.to_string()))
}

pub struct InMemoryPostRepository {
    data: Arc<RwLock<BlogData>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.data.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        check(&post)?;

        let mut data = self.data.write().await;
        if data
            .posts
            .values()
            .any(|other| other.slug == post.slug && other.id != post.id)
        {
            return Err(RepoError::Constraint(format!(
                "post slug '{}' already exists",
                post.slug
            )));
        }
        if let Some(category_id) = post.category_id {
            if !data.categories.contains_key(&category_id) {
                return Err(RepoError::Constraint(format!(
                    "category {category_id} does not exist"
                )));
            }
        }

        data.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.data.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.data.read().await.posts_where(|_| true))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts_where(|p| p.category_id == Some(category_id)))
    }

    async fn search_by_title(&self, query: &SearchQuery) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts_where(|p| query.matches(&p.title)))
    }
}

pub struct InMemoryCategoryRepository {
    data: Arc<RwLock<BlogData>>,
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.data.read().await.categories.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        check(&category)?;

        let mut data = self.data.write().await;
        if data
            .categories
            .values()
            .any(|other| other.slug == category.slug && other.id != category.id)
        {
            return Err(RepoError::Constraint(format!(
                "category slug '{}' already exists",
                category.slug
            )));
        }

        data.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Posts in the category stay, uncategorized.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        if data.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        for post in data.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let data = self.data.read().await;
        Ok(data.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn list_with_post_counts(&self) -> Result<Vec<CategorySummary>, RepoError> {
        let data = self.data.read().await;

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for category_id in data.posts.values().filter_map(|p| p.category_id) {
            *counts.entry(category_id).or_default() += 1;
        }

        let mut summaries: Vec<CategorySummary> = data
            .categories
            .values()
            .map(|category| CategorySummary {
                post_count: counts.get(&category.id).copied().unwrap_or(0),
                category: category.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.post_count
                .cmp(&a.post_count)
                .then_with(|| a.category.slug.cmp(&b.category.slug))
        });

        Ok(summaries)
    }
}
