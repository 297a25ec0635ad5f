//! folio - portfolio and blog server.
//!
//! Serves a small personal site: a home page, a blog listing, one page per
//! post, and Open Graph preview images for link unfurling. The same pages
//! can be written out as a static site.
//!
//! # Architecture
//!
//! - **Blog** (`folio-core`): immutable post registry and compiled-in
//!   Markdown documents; decides between local content and an external link
//! - **Render**: complete HTML pages with Open Graph tags using maud
//!   (compile-time templates)
//! - **OG**: preview cards drawn as SVG and rasterized to PNG with resvg
//! - **Cache**: in-process moka caches for pages and cards, plus
//!   Cache-Control headers for CDN caching
//!
//! # URL Pattern
//!
//! ```text
//! GET /blog/{identifier}
//! GET /og/{identifier}.png
//! ```
//!
//! Unknown identifiers get a 404 page, but a "Not found" preview card.

pub mod config;
pub mod error;
pub mod export;
pub mod og;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::SiteError;
pub use export::{ExportSummary, export_site};
pub use og::OgRenderer;
pub use routes::router;
pub use state::AppState;
