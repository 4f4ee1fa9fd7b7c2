//! Error handling - problem details rendered as HTML pages.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_core::error::RepoError;
use blog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to error pages.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Internal(detail) => {
                // Details stay in the logs
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        }
    }
}

fn error_page(problem: &ErrorResponse) -> String {
    let detail = problem
        .detail
        .as_deref()
        .map(|d| format!("\n  <p>{}</p>", tera::escape_html(d)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{status} {title}</title></head>\n<body>\n  <h1>{status} {title}</h1>{detail}\n  <p><a href=\"/\">Back to all posts</a></p>\n</body>\n</html>\n",
        status = problem.status,
        title = tera::escape_html(&problem.title),
    )
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(error_page(&self.problem()))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, slug } => {
                AppError::NotFound(format!("No {} matches '{}'", entity_type, slug))
            }
            DomainError::Validation(msg) => AppError::Internal(msg),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) | RepoError::Constraint(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn test_not_found_page() {
        let err: AppError = DomainError::not_found("post", "<missing>").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();

        assert!(html.contains("404 Not Found"));
        assert!(html.contains("No post matches &#x27;&lt;missing&gt;&#x27;"));
        assert!(!html.contains("<missing>"));
    }

    #[actix_web::test]
    async fn test_storage_errors_hide_details() {
        let err: AppError = DomainError::from(RepoError::Query("secret sql".to_string())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();

        assert!(html.contains("500 Internal Server Error"));
        assert!(!html.contains("secret sql"));
    }
}
