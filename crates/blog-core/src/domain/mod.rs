//! Domain entities - the core business objects.

mod category;
mod post;
mod search;
pub mod slug;

pub use category::{Category, CategorySummary};
pub use post::Post;
pub use search::{SearchQuery, SearchQueryError};

use crate::error::DomainError;

/// Field checks an entity must pass before it is stored.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}
