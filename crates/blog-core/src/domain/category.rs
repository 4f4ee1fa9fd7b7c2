use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Validate;
use super::slug::{is_valid_slug, slugify};
use crate::error::DomainError;

/// Category entity - groups posts, addressed externally by its slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub const MAX_NAME_LEN: usize = 100;

    /// Create a new category with its slug derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
        }
    }
}

impl Validate for Category {
    fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.name.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "category name must be 1 to {} characters",
                Self::MAX_NAME_LEN
            )));
        }
        if !is_valid_slug(&self.slug) {
            return Err(DomainError::Validation(format!(
                "invalid category slug '{}'",
                self.slug
            )));
        }
        Ok(())
    }
}

/// A category together with its live post count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: u64,
}
