//! Middleware modules.

pub mod error;
mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id};
