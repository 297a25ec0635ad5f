//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use maud::{Markup, PreEscaped, html};

use crate::config::Config;

/// Inline CSS for all pages.
///
/// Black background, white text, one accent color. Post bodies use the
/// `.prose` rules; code blocks keep the highlighter's inline colors.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#000;--fg:#f5f5f5;--fg2:#a3a3a3;--fg3:#737373;--accent:#f97316;--border:#262626;--mono:"JetBrains Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column}
a{color:inherit;text-decoration:none}
img{max-width:100%;height:auto}

.nav{display:flex;justify-content:space-between;align-items:center;padding:1.25rem 2rem;font-family:var(--mono);font-size:.9rem}
.nav a{transition:color .5s}
.nav a:hover{color:var(--accent)}
.nav-links{display:flex;gap:1.5rem}

main{flex:1;width:100%}

.intro{position:relative;height:calc(100vh - 4rem);overflow:hidden}
.intro-image{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.intro-shade{position:absolute;inset:0;background:linear-gradient(to right,rgba(0,0,0,.9),rgba(0,0,0,.7))}
.intro-name{position:absolute;margin:2rem;font-family:var(--mono);font-size:3.75rem;line-height:1.1}

.recent{padding:4rem 2rem}
.recent h2{font-size:1.5rem;margin-bottom:2rem;font-family:var(--mono)}
.recent-more{display:inline-block;margin-top:2rem;color:var(--fg2);transition:color .5s}
.recent-more:hover{color:var(--accent)}

.listing{margin:2rem}
.listing h1{font-size:3rem}
.post-list{list-style:none;margin-top:2.5rem;display:flex;flex-direction:column;gap:2rem}
.post-item{display:block;transition:color .5s}
.post-item:hover{color:var(--accent)}
.post-date{font-size:.875rem;color:var(--fg2)}
.post-title{font-size:1.25rem;margin-top:.5rem}
.post-external{font-size:.75rem;color:var(--fg3);margin-left:.5rem}

.interstitial{min-height:calc(100vh - 8rem);display:flex;align-items:center;justify-content:center}
.interstitial-card{margin:1rem;border:1px solid var(--border);padding:2rem;width:100%;max-width:600px}
.interstitial-title{margin-top:.5rem;font-weight:600;font-size:1.25rem}
.interstitial-note{margin-top:1rem;color:var(--fg2)}
.interstitial-actions{margin-top:1rem;display:flex;justify-content:space-between}
.button{border:1px solid var(--border);padding:.5rem 1rem;border-radius:6px;transition:background .5s}
.button:hover{background:var(--accent);color:#000}

.prose{max-width:65ch;margin:2rem auto;padding:0 1rem;color:var(--fg2);line-height:1.75}
.prose h1,.prose h2,.prose h3,.prose h4{color:var(--fg);font-weight:700;margin:2rem 0 1rem;line-height:1.3}
.prose h1{font-size:2.25rem;margin-top:0}
.prose h2{font-size:1.5rem}
.prose h3{font-size:1.25rem}
.prose .post-meta{font-size:1.1rem;color:var(--fg3);margin:0 0 .5rem}
.prose p{margin:1.25rem 0}
.prose a{color:var(--fg);text-decoration:underline;text-decoration-color:var(--accent)}
.prose ul,.prose ol{margin:1.25rem 0;padding-left:1.5rem}
.prose li{margin:.5rem 0}
.prose blockquote{border-left:3px solid var(--border);padding-left:1rem;font-style:italic}
.prose pre{border:1px solid var(--border);border-radius:6px;padding:1rem;overflow-x:auto;margin:1.5rem 0;font-size:.875rem;line-height:1.6}
.prose code{font-family:var(--mono);font-size:.875em;color:var(--fg)}
.prose :not(pre)>code::before,.prose :not(pre)>code::after{content:"`"}
.prose table{border-collapse:collapse;width:100%;margin:1.5rem 0;font-size:.9rem}
.prose th,.prose td{border-bottom:1px solid var(--border);padding:.5rem .75rem;text-align:left}
.prose th{color:var(--fg)}
.prose hr{border:none;border-top:1px solid var(--border);margin:2rem 0}

.footer{text-align:center;padding:1.5rem;font-size:.8rem;color:var(--fg3)}

@media(max-width:639px){
.listing h1{font-size:1.875rem}
.post-date{font-size:.75rem}
.post-title{font-size:1.125rem}
.intro-name{font-size:2.5rem}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#000;color:#f5f5f5;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#a3a3a3;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#f97316}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles only (page CSS and highlighted code), no scripts, no frames.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src 'self' https: data:; form-action 'none'; frame-ancestors 'none'";

/// Assets the pages reference, shipped in the repository's `public/`.
pub const FAVICON_PATH: &str = "/favicon.svg";
pub const INTRO_IMAGE_PATH: &str = "/home.svg";

/// Site-wide values every page needs.
#[derive(Debug, Clone, Copy)]
pub struct SiteMeta<'a> {
    pub base_url: &'a str,
    pub site_name: &'a str,
    pub author: &'a str,
}

impl<'a> From<&'a Config> for SiteMeta<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            base_url: &config.base_url,
            site_name: &config.site_name,
            author: &config.author,
        }
    }
}

impl SiteMeta<'_> {
    /// Absolute URL for a site path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "article", "website").
    pub og_type: &'a str,
    /// Absolute URL of the preview image.
    pub image: &'a str,
}

/// Render the full HTML page shell with `<head>`, OG tags, and body content.
pub fn page_shell(
    title: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    body_content: Markup,
    site: SiteMeta<'_>,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(og.description);
                link rel="canonical" href=(canonical_url);
                link rel="icon" type="image/svg+xml" href=(FAVICON_PATH);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site.site_name);
                meta property="og:type" content=(og.og_type);
                meta property="og:image" content=(og.image);
                meta property="og:image:width" content=(crate::og::OG_WIDTH);
                meta property="og:image:height" content=(crate::og::OG_HEIGHT);
                meta property="og:image:type" content="image/png";

                // Twitter Card
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(og.title);
                meta name="twitter:description" content=(og.description);
                meta name="twitter:image" content=(og.image);

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (nav(site))
                main { (body_content) }
                footer class="footer" {
                    (site.author) " · " (site.site_name)
                }
            }
        }
    }
}

/// Top navigation bar.
pub fn nav(site: SiteMeta<'_>) -> Markup {
    html! {
        nav class="nav" {
            a href="/" { (site.author) }
            div class="nav-links" {
                a href="/" { "home" }
                a href=(folio_core::BLOG_PATH) { "blog" }
            }
        }
    }
}

/// One entry of a post list: date above title, linked to its target.
pub fn post_list_item(item: &folio_core::ListItem<'_>) -> Markup {
    let external = item.target.is_external();
    html! {
        li {
            a class="post-item" href=(item.target.href())
                rel=[external.then_some("noopener noreferrer")] {
                div class="post-date" { (item.date) }
                p class="post-title" {
                    (item.title)
                    @if external {
                        span class="post-external" { "↗" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ListItem, NavTarget};

    fn site() -> SiteMeta<'static> {
        SiteMeta {
            base_url: "https://example.dev",
            site_name: "example.dev",
            author: "jane doe",
        }
    }

    #[test]
    fn site_url_joins_path() {
        assert_eq!(site().url("/blog/a"), "https://example.dev/blog/a");
    }

    #[test]
    fn page_shell_has_og_tags() {
        let og = OpenGraphData {
            title: "Post A",
            description: "Jan 1, 2024",
            og_type: "article",
            image: "https://example.dev/og/a.png",
        };
        let page = page_shell(
            "Post A | example.dev",
            "https://example.dev/blog/a",
            og,
            html! { p { "body" } },
            site(),
        )
        .into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<meta property="og:image" content="https://example.dev/og/a.png">"#));
        assert!(page.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(page.contains(r#"<link rel="canonical" href="https://example.dev/blog/a">"#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn page_shell_escapes_title() {
        let og = OpenGraphData {
            title: "<script>",
            description: "",
            og_type: "website",
            image: "",
        };
        let page = page_shell("<script>", "", og, html! {}, site()).into_string();
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn list_item_internal() {
        let item = ListItem {
            date: "Jan 1, 2024",
            title: "Post A",
            target: NavTarget::Internal("/blog/a".to_string()),
        };
        let html = post_list_item(&item).into_string();
        assert!(html.contains(r#"href="/blog/a""#));
        assert!(!html.contains("rel="));
        assert!(html.contains("Jan 1, 2024"));
    }

    #[test]
    fn list_item_external() {
        let item = ListItem {
            date: "Jan 2, 2024",
            title: "Post B",
            target: NavTarget::External("https://x.example/b"),
        };
        let html = post_list_item(&item).into_string();
        assert!(html.contains(r#"href="https://x.example/b""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }
}
