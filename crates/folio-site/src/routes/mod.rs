//! Route definitions for the site.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /blog` - Blog listing
//! - `GET /blog/{id}` - Post page or external-link interstitial
//! - `GET /og/{id}.png` - Post preview image
//! - `GET /opengraph-image.png` - Site preview image
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - anything else - Static file from the public directory, or the 404 page

mod health;
mod og;
mod pages;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Body of `/robots.txt`. Crawlers should fetch pages and cards for link
/// previews.
pub const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

/// Build the complete site router.
pub fn router(state: AppState) -> Router {
    let assets =
        ServeDir::new(&state.config.public_dir).not_found_service(pages::not_found.into_service());

    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::listing))
        .route("/blog/{id}", get(pages::post))
        .route("/og/{file}", get(og::post_image))
        .route("/opengraph-image.png", get(og::site_image))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .fallback_service(assets)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
async fn robots_txt() -> impl IntoResponse {
    ([("content-type", "text/plain; charset=utf-8")], ROBOTS_TXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use folio_core::{Blog, ContentLibrary, PostRecord, Registry};
    use http_body_util::BodyExt;
    use resvg::usvg::fontdb;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::og::OgRenderer;

    fn app() -> Router {
        let registry = Registry::new(vec![
            PostRecord::local("a", "Post A", "Jan 1, 2024"),
            PostRecord::external("b", "Post B", "Jan 2, 2024", "https://x.example/b"),
        ])
        .unwrap();
        let library = ContentLibrary::from_documents([("a", "Content of **a**")]);
        let blog = Blog::new(registry, library).unwrap();

        let config = Config {
            base_url: "https://example.dev".to_string(),
            public_dir: std::env::temp_dir().join("folio-no-such-public-dir"),
            ..Config::default()
        };
        let og = OgRenderer::with_fonts(fontdb::Database::new(), &config.author, &config.site_name);

        router(AppState::with_renderer(config, blog, og))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    fn text(body: &[u8]) -> String {
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_page_ok() {
        let (status, headers, body) = get(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert!(text(&body).contains("divyanshu pundir"));
    }

    #[tokio::test]
    async fn listing_links_every_post() {
        let (status, _, body) = get(app(), "/blog").await;
        assert_eq!(status, StatusCode::OK);
        let html = text(&body);
        assert!(html.contains(r#"href="/blog/a""#));
        assert!(html.contains(r#"href="https://x.example/b""#));
    }

    #[tokio::test]
    async fn local_post_renders_content() {
        let (status, headers, body) = get(app(), "/blog/a").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key(header::ETAG));
        let html = text(&body);
        assert!(html.contains("<h1>Post A</h1>"));
        assert!(html.contains("<strong>a</strong>"));
    }

    #[tokio::test]
    async fn external_post_renders_interstitial() {
        let (status, _, body) = get(app(), "/blog/b").await;
        assert_eq!(status, StatusCode::OK);
        let html = text(&body);
        assert!(html.contains("This post is hosted on an external site"));
        assert!(html.contains(r#"href="https://x.example/b""#));
    }

    #[tokio::test]
    async fn unknown_post_is_404() {
        let (status, _, body) = get(app(), "/blog/c").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text(&body).contains("Not Found"));
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let app = app();
        let (_, first_headers, first) = get(app.clone(), "/blog/a").await;
        let (_, second_headers, second) = get(app, "/blog/a").await;
        assert_eq!(first, second);
        assert_eq!(first_headers[header::ETAG], second_headers[header::ETAG]);
    }

    #[tokio::test]
    async fn preview_image_for_known_post() {
        let (status, headers, body) = get(app(), "/og/a.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert!(body.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn preview_image_for_unknown_post_still_succeeds() {
        let (status, headers, body) = get(app(), "/og/c.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert!(body.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn preview_image_requires_exact_png_name() {
        let app = app();
        let (_, _, placeholder) = get(app.clone(), "/og/c.png").await;
        let (_, _, known) = get(app.clone(), "/og/a.png").await;
        assert_ne!(known, placeholder);

        for uri in ["/og/a", "/og/%20a.png", "/og/a.png.png"] {
            let (status, _, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, placeholder, "{uri} should serve the placeholder card");
        }
    }

    #[tokio::test]
    async fn site_preview_image() {
        let (status, headers, _) = get(app(), "/opengraph-image.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn health_reports_post_count() {
        let (status, _, body) = get(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["posts"], 2);
    }

    #[tokio::test]
    async fn robots_txt_allows_all() {
        let (status, _, body) = get(app(), "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text(&body), ROBOTS_TXT);
    }

    #[tokio::test]
    async fn referenced_assets_are_shipped() {
        use crate::render::components::{FAVICON_PATH, INTRO_IMAGE_PATH};

        let registry = Registry::new(Vec::new()).unwrap();
        let blog = Blog::new(registry, ContentLibrary::from_documents(Vec::<(String, String)>::new())).unwrap();
        let config = Config {
            public_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../public").into(),
            ..Config::default()
        };
        let og = OgRenderer::with_fonts(fontdb::Database::new(), &config.author, &config.site_name);
        let app = router(AppState::with_renderer(config, blog, og));

        let (_, _, home) = get(app.clone(), "/").await;
        let home = text(&home);
        for path in [FAVICON_PATH, INTRO_IMAGE_PATH] {
            assert!(home.contains(&format!(r#""{path}""#)), "home page does not link {path}");
            let (status, _, body) = get(app.clone(), path).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert!(text(&body).starts_with("<svg"));
        }
    }

    #[tokio::test]
    async fn unknown_path_is_404_page() {
        let (status, _, body) = get(app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text(&body).contains("Not Found"));
    }
}
