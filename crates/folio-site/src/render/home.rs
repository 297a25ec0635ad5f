//! Home page: full-screen intro plus the most recent posts.

use folio_core::Registry;
use maud::{Markup, html};

use super::components::{INTRO_IMAGE_PATH, OpenGraphData, SiteMeta, page_shell, post_list_item};

/// How many posts the home page lists.
const RECENT_POSTS: usize = 3;

/// Render the home page.
pub fn render(registry: &Registry, site: SiteMeta<'_>) -> Markup {
    let canonical = site.url("/");
    let image = site.url("/opengraph-image.png");
    let description = format!("{}'s portfolio and blog", site.author);

    let og = OpenGraphData {
        title: site.site_name,
        description: &description,
        og_type: "website",
        image: &image,
    };

    let body = html! {
        section class="intro" {
            img class="intro-image" src=(INTRO_IMAGE_PATH) alt="";
            div class="intro-shade" {}
            h1 class="intro-name" { (site.author) }
        }
        @if !registry.is_empty() {
            section class="recent" {
                h2 { "recent writing" }
                ul class="post-list" {
                    @for item in registry.listing().take(RECENT_POSTS) {
                        (post_list_item(&item))
                    }
                }
                a class="recent-more" href=(folio_core::BLOG_PATH) { "all posts →" }
            }
        }
    };

    page_shell(site.site_name, &canonical, og, body, site)
}
