//! Read-only query layer used by the request handlers.

use std::sync::Arc;

use crate::domain::{Category, CategorySummary, Post, SearchQuery};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository};

/// A category page: the category and every post filed under it.
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub category: Category,
    pub posts: Vec<Post>,
}

/// Blog queries over injected repositories.
#[derive(Clone)]
pub struct BlogQueries {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl BlogQueries {
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { posts, categories }
    }

    /// All posts, newest first.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_all().await?)
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post", slug))
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Result<CategoryPage, DomainError> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("category", slug))?;
        let posts = self.posts.find_by_category(category.id).await?;

        Ok(CategoryPage { category, posts })
    }

    /// Categories ranked by post count, counted at query time.
    pub async fn get_sorted_categories(&self) -> Result<Vec<CategorySummary>, DomainError> {
        Ok(self.categories.list_with_post_counts().await?)
    }

    pub async fn search_posts(&self, query: &SearchQuery) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.search_by_title(query).await?)
    }
}
