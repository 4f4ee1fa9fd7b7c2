//! HTTP handlers and route configuration.

mod blog;
mod health;

use actix_web::web;

use crate::middleware::error::{AppError, AppResult};

/// Slugs are word characters and hyphens.
const SLUG: &str = r"{slug:[-\w]+}";

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blog::list_all))
        .route(&format!("/post/{SLUG}"), web::get().to(blog::show_post))
        .route(
            &format!("/category/{SLUG}"),
            web::get().to(blog::show_category),
        )
        .route("/search", web::post().to(blog::search))
        .route("/health", web::get().to(health::health_check))
        .default_service(web::to(not_found));
}

async fn not_found() -> AppResult<&'static str> {
    Err(AppError::NotFound("No page at this address".to_string()))
}
