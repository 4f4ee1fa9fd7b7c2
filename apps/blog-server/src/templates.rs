//! Page rendering with Tera.
//!
//! The blog templates are embedded in the binary; a directory given at startup
//! can override any of them by name.

use std::path::Path;

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use serde::Serialize;
use tera::{Context, Tera};

use crate::middleware::error::{AppError, AppResult};

const BUILTIN: [(&str, &str); 6] = [
    ("base.html", include_str!("../templates/base.html")),
    (
        "partials/post_list.html",
        include_str!("../templates/partials/post_list.html"),
    ),
    (
        "blog/list_all.html",
        include_str!("../templates/blog/list_all.html"),
    ),
    (
        "blog/show_post.html",
        include_str!("../templates/blog/show_post.html"),
    ),
    (
        "blog/show_category.html",
        include_str!("../templates/blog/show_category.html"),
    ),
    ("blog/search.html", include_str!("../templates/blog/search.html")),
];

/// Template renderer.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Built-in templates only.
    pub fn builtin() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN)?;
        Ok(Self { tera })
    }

    /// Built-in templates, overridden by `dir/**/*.html` when given.
    pub fn load(dir: Option<&Path>) -> tera::Result<Self> {
        let builtin = Self::builtin()?;
        let Some(dir) = dir else {
            return Ok(builtin);
        };

        let pattern = dir.join("**").join("*.html");
        let mut tera = Tera::parse(&pattern.to_string_lossy())?;
        let overridden = tera.get_template_names().count();
        tera.extend(&builtin.tera)?;
        tera.build_inheritance_chains()?;

        tracing::info!(dir = %dir.display(), overridden, "Loaded template overrides");
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &impl Serialize) -> AppResult<String> {
        let context = Context::from_serialize(context)
            .map_err(|e| AppError::Internal(format!("template context for {name}: {e}")))?;

        self.tera
            .render(name, &context)
            .map_err(|e| AppError::Internal(format!("rendering {name}: {e:?}")))
    }

    /// Render a full page as a `200 OK` HTML response.
    pub fn page(&self, name: &str, context: &impl Serialize) -> AppResult<HttpResponse> {
        let html = self.render(name, context)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html))
    }
}

#[cfg(test)]
mod tests {
    use blog_core::domain::{Category, CategorySummary, Post};
    use blog_shared::context::{SearchContext, ShowPostContext};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_builtin_templates_parse() {
        let templates = Templates::builtin().unwrap();
        for (name, _) in BUILTIN {
            assert!(templates.tera.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_post_content_is_escaped() {
        let templates = Templates::builtin().unwrap();
        let post = Post::new(Uuid::new_v4(), "Tags", "<script>alert(1)</script>\nsecond line");
        let context = ShowPostContext {
            categories: vec![CategorySummary {
                category: Category::new("News"),
                post_count: 1,
            }],
            post,
        };

        let html = templates.render("blog/show_post.html", &context).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<br>"));
        assert!(html.contains("/category/news"));
    }

    #[test]
    fn test_search_message_rendered() {
        let templates = Templates::builtin().unwrap();
        let context = SearchContext::rejected(Vec::new(), "abc", "Too short.");

        let html = templates.render("blog/search.html", &context).unwrap();

        assert!(html.contains("Too short."));
    }

    #[test]
    fn test_missing_template_is_internal_error() {
        let templates = Templates::builtin().unwrap();
        let err = templates.render("nope.html", &SearchContext::rejected(Vec::new(), "", ""));
        assert!(matches!(err, Err(AppError::Internal(_))));
    }
}
