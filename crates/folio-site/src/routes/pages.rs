//! HTML page routes: home, blog listing, and post pages.
//!
//! Rendered pages are cached in-process by route path. Only successful
//! renders are cached, so unknown identifiers never occupy cache entries.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maud::Markup;

use crate::error::SiteError;
use crate::render::{self, SiteMeta};
use crate::state::AppState;

/// Browser and CDN cache lifetimes for pages.
const PAGE_CACHE_CONTROL: &str = "public, max-age=300, s-maxage=3600, stale-while-revalidate=600";

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Result<Response, SiteError> {
    cached_page(&state, "/".to_string(), || {
        Ok(render::home::render(
            state.blog.registry(),
            SiteMeta::from(state.config.as_ref()),
        ))
    })
    .await
}

/// `GET /blog`
pub async fn listing(State(state): State<AppState>) -> Result<Response, SiteError> {
    cached_page(&state, folio_core::BLOG_PATH.to_string(), || {
        Ok(render::listing::render(
            state.blog.registry(),
            SiteMeta::from(state.config.as_ref()),
        ))
    })
    .await
}

/// `GET /blog/{id}`
///
/// Local posts render their document; external posts render the
/// interstitial; unknown identifiers end in the 404 page.
pub async fn post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, SiteError> {
    cached_page(&state, folio_core::post_path(&id), || {
        let view = state.blog.open(&id)?;
        Ok(render::post::render(
            &view,
            SiteMeta::from(state.config.as_ref()),
        ))
    })
    .await
}

/// Fallback for paths that match neither a route nor a static file.
pub async fn not_found() -> SiteError {
    SiteError::NotFound("page".to_string())
}

/// Serve a page from the cache, rendering and caching it on a miss.
async fn cached_page<F>(state: &AppState, key: String, render: F) -> Result<Response, SiteError>
where
    F: FnOnce() -> Result<Markup, SiteError>,
{
    if let Some(html) = state.cache.get(&key).await {
        tracing::debug!(key = %key, "page cache hit");
        return Ok(build_response(&html));
    }

    tracing::debug!(key = %key, "page cache miss, rendering");

    let html: Arc<str> = render()?.into_string().into();
    state.cache.insert(key, Arc::clone(&html)).await;

    Ok(build_response(&html))
}

/// Build an HTTP response with HTML content and security/cache headers.
fn build_response(html: &str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(PAGE_CACHE_CONTROL),
    );

    // ETag (xxHash of content)
    if let Ok(val) = HeaderValue::from_str(&etag(html.as_bytes())) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html.to_string()).into_response()
}

/// Strong ETag for a response body.
fn etag(body: &[u8]) -> String {
    let hash = xxhash_rust::xxh3::xxh3_64(body);
    format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()))
}
