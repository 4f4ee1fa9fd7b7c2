//! Blog pages.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::domain::SearchQuery;
use blog_shared::context::{ListAllContext, SearchContext, ShowCategoryContext, ShowPostContext};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Search form submission.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

/// GET /
pub async fn list_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let context = ListAllContext {
        categories: state.blog.get_sorted_categories().await?,
        posts: state.blog.list_all_posts().await?,
    };

    state.templates.page("blog/list_all.html", &context)
}

/// GET /post/{slug}
pub async fn show_post(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.blog.get_post_by_slug(&slug).await?;
    let context = ShowPostContext {
        categories: state.blog.get_sorted_categories().await?,
        post,
    };

    state.templates.page("blog/show_post.html", &context)
}

/// GET /category/{slug}
pub async fn show_category(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.blog.get_category_by_slug(&slug).await?;
    let categories = state.blog.get_sorted_categories().await?;

    state.templates.page(
        "blog/show_category.html",
        &ShowCategoryContext::new(categories, page),
    )
}

/// POST /search
///
/// A query outside the length bounds is answered with a message, not an error.
pub async fn search(
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> AppResult<HttpResponse> {
    let categories = state.blog.get_sorted_categories().await?;

    let context = match SearchQuery::parse(&form.search) {
        Ok(query) => {
            let posts = state.blog.search_posts(&query).await?;
            tracing::debug!(query = query.as_str(), hits = posts.len(), "Search");
            SearchContext::results(categories, query.as_str(), posts)
        }
        Err(rejected) => {
            SearchContext::rejected(categories, form.search.trim(), rejected.to_string())
        }
    };

    state.templates.page("blog/search.html", &context)
}
