//! Blog listing page.

use folio_core::Registry;
use maud::{Markup, html};

use super::components::{OpenGraphData, SiteMeta, page_shell, post_list_item};

/// Render the listing of every post, in registry order.
pub fn render(registry: &Registry, site: SiteMeta<'_>) -> Markup {
    let canonical = site.url(folio_core::BLOG_PATH);
    let image = site.url("/opengraph-image.png");
    let title = format!("blog | {}", site.site_name);
    let description = format!("Writing by {}", site.author);

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "website",
        image: &image,
    };

    let body = html! {
        div class="listing" {
            h1 { "blog" }
            ul class="post-list" {
                @for item in registry.listing() {
                    (post_list_item(&item))
                }
            }
        }
    };

    page_shell(&title, &canonical, og, body, site)
}
