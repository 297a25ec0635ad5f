//! Error types for the site.
//!
//! Errors are rendered as simple HTML error pages, since every route except
//! `/health` serves HTML or images to browsers and crawlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, Markup, html};

/// Site error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Nothing to show for this path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (image rendering, I/O, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<folio_core::Error> for SiteError {
    fn from(err: folio_core::Error) -> Self {
        match err {
            folio_core::Error::NotFound(id) => Self::NotFound(id),
            // Same page as an unknown id, but this is a configuration bug.
            folio_core::Error::ContentMissing(id) => {
                tracing::error!(identifier = %id, "post is registered but has no content");
                Self::NotFound(id)
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl SiteError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let markup = match &self {
            Self::NotFound(_) => not_found_page(),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                error_page(
                    "Internal Error",
                    "Something went wrong while rendering this page. Please try again later.",
                )
            }
        };

        (status, markup).into_response()
    }
}

/// The 404 page, also written as `404.html` by the static export.
pub fn not_found_page() -> Markup {
    error_page(
        "Not Found",
        "There is nothing here. The post may have moved or never existed.",
    )
}

fn error_page(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="robots" content="noindex";
                style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
            }
            body {
                main class="error-page" {
                    h1 { (title) }
                    p { (message) }
                    a href="/blog" { "Back to the blog" }
                }
            }
        }
    }
}
