//! Template contexts - one per page.
//!
//! Every page carries the ranked category list for the sidebar.

use serde::Serialize;

use blog_core::CategoryPage;
use blog_core::domain::{Category, CategorySummary, Post};

/// `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct ListAllContext {
    pub categories: Vec<CategorySummary>,
    pub posts: Vec<Post>,
}

/// `GET /post/{slug}`
#[derive(Debug, Clone, Serialize)]
pub struct ShowPostContext {
    pub categories: Vec<CategorySummary>,
    pub post: Post,
}

/// `GET /category/{slug}`
#[derive(Debug, Clone, Serialize)]
pub struct ShowCategoryContext {
    pub categories: Vec<CategorySummary>,
    pub category: Category,
    pub posts: Vec<Post>,
}

impl ShowCategoryContext {
    pub fn new(categories: Vec<CategorySummary>, page: CategoryPage) -> Self {
        Self {
            categories,
            category: page.category,
            posts: page.posts,
        }
    }
}

/// `POST /search` - holds either the matching posts or a message explaining
/// why the query was rejected, never both.
#[derive(Debug, Clone, Serialize)]
pub struct SearchContext {
    pub categories: Vec<CategorySummary>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchContext {
    pub fn results(
        categories: Vec<CategorySummary>,
        query: impl Into<String>,
        posts: Vec<Post>,
    ) -> Self {
        Self {
            categories,
            query: query.into(),
            posts: Some(posts),
            message: None,
        }
    }

    pub fn rejected(
        categories: Vec<CategorySummary>,
        query: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            categories,
            query: query.into(),
            posts: None,
            message: Some(message.into()),
        }
    }
}
