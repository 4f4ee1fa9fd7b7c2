//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the entities, the repository ports and the read-only
//! query layer, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod queries;

pub use error::DomainError;
pub use queries::{BlogQueries, CategoryPage};
