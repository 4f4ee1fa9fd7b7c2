//! # Blog Shared
//!
//! View-models handed to the presentation layer, and the problem-details
//! payload used for error pages.

pub mod context;
pub mod response;

pub use response::ErrorResponse;
