//! Post page: rendered content for local posts, an interstitial for posts
//! hosted elsewhere.

use folio_core::{PostRecord, PostView};
use maud::{Markup, PreEscaped, html};

use super::components::{OpenGraphData, SiteMeta, page_shell};

/// Render the page for an opened post.
pub fn render(view: &PostView<'_>, site: SiteMeta<'_>) -> Markup {
    let record = view.record();
    let canonical = site.url(&record.path());
    let image = site.url(&og_image_path(&record.id));
    let title = format!("{} | {}", record.title, site.site_name);

    let og = OpenGraphData {
        title: &record.title,
        description: &record.date,
        og_type: "article",
        image: &image,
    };

    let body = match view {
        PostView::Local { record, content } => article(record, &content.html),
        PostView::External { record, link } => interstitial(record, link),
    };

    page_shell(&title, &canonical, og, body, site)
}

/// Site path of a post's preview image.
pub fn og_image_path(id: &str) -> String {
    format!("/og/{id}.png")
}

fn article(record: &PostRecord, content_html: &str) -> Markup {
    html! {
        article class="prose" {
            h3 class="post-meta" { (record.date) }
            h1 { (record.title) }
            (PreEscaped(content_html))
        }
    }
}

fn interstitial(record: &PostRecord, link: &str) -> Markup {
    html! {
        div class="interstitial" {
            div class="interstitial-card" {
                div class="post-date" { (record.date) }
                div class="interstitial-title" { (record.title) }
                div class="interstitial-note" { "This post is hosted on an external site" }
                div class="interstitial-actions" {
                    a class="button" href=(folio_core::BLOG_PATH) { "Back" }
                    a class="button" href=(link) rel="noopener noreferrer" { "Continue" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::RenderedContent;

    const SITE: SiteMeta<'static> = SiteMeta {
        base_url: "https://example.dev",
        site_name: "example.dev",
        author: "jane doe",
    };

    #[test]
    fn local_post_renders_content() {
        let record = PostRecord::local("a", "Post A", "Jan 1, 2024");
        let view = PostView::Local {
            record: &record,
            content: RenderedContent {
                html: "<p>Hello <em>a</em></p>".to_string(),
            },
        };
        let html = render(&view, SITE).into_string();

        assert!(html.contains(r#"<h3 class="post-meta">Jan 1, 2024</h3>"#));
        assert!(html.contains("<h1>Post A</h1>"));
        assert!(html.contains("<p>Hello <em>a</em></p>"));
        assert!(html.contains("https://example.dev/og/a.png"));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.dev/blog/a">"#));
        assert!(!html.contains("hosted on an external site"));
    }

    #[test]
    fn external_post_renders_interstitial() {
        let record = PostRecord::external("b", "Post B", "Jan 2, 2024", "https://x.example/b");
        let view = PostView::External {
            record: &record,
            link: "https://x.example/b",
        };
        let html = render(&view, SITE).into_string();

        assert!(html.contains("This post is hosted on an external site"));
        assert!(html.contains(r#"<a class="button" href="/blog">Back</a>"#));
        assert!(html.contains(
            r#"<a class="button" href="https://x.example/b" rel="noopener noreferrer">Continue</a>"#
        ));
        assert!(!html.contains(r#"class="prose""#));
    }

    #[test]
    fn og_image_path_for_id() {
        assert_eq!(og_image_path("a"), "/og/a.png");
    }
}
