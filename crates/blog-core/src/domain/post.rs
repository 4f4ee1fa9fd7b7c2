use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Validate;
use super::slug::{is_valid_slug, slugify};
use crate::error::DomainError;

/// Post entity - a blog post, addressed externally by its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub date_added: DateTime<Utc>,
}

impl Post {
    /// Maximum title length in characters.
    pub const MAX_TITLE_LEN: usize = 100;

    /// Create a new uncategorized post dated now, with its slug derived from the title.
    pub fn new(author_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: None,
            slug: slugify(&title),
            title,
            content: content.into(),
            date_added: Utc::now(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn dated(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = date_added;
        self
    }
}

impl Validate for Post {
    /// Title must be 1 to 100 characters and the slug well formed.
    fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("post title is empty".to_string()));
        }
        if self.title.chars().count() > Self::MAX_TITLE_LEN {
            return Err(DomainError::Validation(format!(
                "post title exceeds {} characters",
                Self::MAX_TITLE_LEN
            )));
        }
        if !is_valid_slug(&self.slug) {
            return Err(DomainError::Validation(format!(
                "invalid post slug '{}'",
                self.slug
            )));
        }
        Ok(())
    }
}
