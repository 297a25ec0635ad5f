//! Application state shared across all request handlers.

use std::sync::Arc;

use folio_core::Blog;
use moka::future::Cache;

use crate::config::Config;
use crate::og::OgRenderer;

/// Type alias for the rendered page cache (route key -> HTML).
pub type HtmlCache = Cache<String, Arc<str>>;

/// Type alias for the OG image cache (identifier -> PNG bytes).
pub type OgImageCache = Cache<String, Arc<[u8]>>;

/// Rendered page cache capacity. Bounded by the number of routes.
const HTML_CACHE_CAPACITY: u64 = 1_000;

/// Rendered pages only change on redeploy.
const HTML_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

/// OG image cache capacity.
/// Each image is ~20-50KB PNG, so 1K entries ~= 20-50MB.
const OG_CACHE_CAPACITY: u64 = 1_000;

const OG_CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post registry and documents. Read-only after startup.
    pub blog: Arc<Blog>,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Preview card renderer.
    pub og: Arc<OgRenderer>,

    /// Rendered HTML keyed by route.
    pub cache: HtmlCache,

    /// Rendered preview cards keyed by identifier.
    pub og_cache: OgImageCache,
}

impl AppState {
    /// Create application state, loading fonts for preview cards.
    pub fn new(config: Config, blog: Blog) -> Self {
        let og = OgRenderer::new(&config);
        Self::with_renderer(config, blog, og)
    }

    /// Create application state with an explicit preview card renderer.
    pub fn with_renderer(config: Config, blog: Blog, og: OgRenderer) -> Self {
        let cache = Cache::builder()
            .max_capacity(HTML_CACHE_CAPACITY)
            .time_to_live(HTML_CACHE_TTL)
            .build();

        let og_cache = Cache::builder()
            .max_capacity(OG_CACHE_CAPACITY)
            .time_to_live(OG_CACHE_TTL)
            .build();

        tracing::info!(
            posts = blog.registry().len(),
            cache_capacity = HTML_CACHE_CAPACITY,
            og_cache_capacity = OG_CACHE_CAPACITY,
            og_cache_ttl_secs = OG_CACHE_TTL.as_secs(),
            "application state initialized"
        );

        Self {
            blog: Arc::new(blog),
            config: Arc::new(config),
            og: Arc::new(og),
            cache,
            og_cache,
        }
    }
}
