//! Open Graph image routes.
//!
//! Cards are cached in-memory to avoid regeneration on repeated requests.
//! Unknown identifiers share one cached placeholder card.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::SiteError;
use crate::og::PreviewCard;
use crate::state::AppState;

/// Cache key of the placeholder card. Not a valid post identifier.
const NOT_FOUND_KEY: &str = "/not-found";

/// Cache key of the site card. Not a valid post identifier.
const SITE_KEY: &str = "/site";

/// Handle a request for a post preview image.
///
/// Route: `GET /og/{identifier}.png`
pub async fn post_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, SiteError> {
    let card = match file.strip_suffix(".png") {
        Some(identifier) => PreviewCard::for_post(state.blog.registry(), identifier),
        None => PreviewCard::NotFound,
    };
    let key = match card {
        PreviewCard::NotFound => {
            tracing::debug!(file = %file, "preview requested for unknown post");
            NOT_FOUND_KEY
        }
        _ => file.as_str(),
    };

    cached_image(&state, key, &card).await
}

/// Handle a request for the site-wide preview image.
///
/// Route: `GET /opengraph-image.png`
pub async fn site_image(State(state): State<AppState>) -> Result<Response, SiteError> {
    cached_image(&state, SITE_KEY, &PreviewCard::Site).await
}

async fn cached_image(
    state: &AppState,
    key: &str,
    card: &PreviewCard<'_>,
) -> Result<Response, SiteError> {
    if let Some(cached) = state.og_cache.get(key).await {
        tracing::debug!(key = %key, "og image cache hit");
        return Ok(png_response(&cached));
    }

    tracing::debug!(key = %key, "og image cache miss, generating");

    let png: Arc<[u8]> = state.og.render(card)?.into();
    state.og_cache.insert(key.to_string(), Arc::clone(&png)).await;

    Ok(png_response(&png))
}

/// Build an HTTP response with PNG content and cache headers.
fn png_response(png_bytes: &[u8]) -> Response {
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600, s-maxage=86400"),
        ),
    ];

    (StatusCode::OK, headers, png_bytes.to_vec()).into_response()
}
