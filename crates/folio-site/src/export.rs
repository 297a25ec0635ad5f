//! Static export: every route written out as files.
//!
//! Produces one page per registry record plus the listing, home page,
//! preview images and the 404 page, so the site can be hosted by any static
//! file server. Files from the public directory are copied first; generated
//! files overwrite them on conflict.

use std::path::Path;

use anyhow::Context;
use folio_core::Blog;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::not_found_page;
use crate::og::{OgRenderer, PreviewCard};
use crate::render::{self, SiteMeta};
use crate::routes::ROBOTS_TXT;

/// Counts of what an export wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub images: usize,
    pub assets: usize,
}

/// Write the whole site under `out`.
pub fn export_site(
    blog: &Blog,
    config: &Config,
    og: &OgRenderer,
    out: &Path,
) -> anyhow::Result<ExportSummary> {
    let mut summary = ExportSummary {
        assets: copy_public_dir(&config.public_dir, out)?,
        ..Default::default()
    };

    let site = SiteMeta::from(config);
    let registry = blog.registry();

    write_file(out, "index.html", render::home::render(registry, site).into_string())?;
    write_file(
        out,
        "blog/index.html",
        render::listing::render(registry, site).into_string(),
    )?;
    write_file(out, "404.html", not_found_page().into_string())?;
    summary.pages += 3;

    for record in registry.records() {
        let view = blog.open(&record.id)?;
        write_file(
            out,
            &format!("blog/{}/index.html", record.id),
            render::post::render(&view, site).into_string(),
        )?;
        summary.pages += 1;

        let card = PreviewCard::Post {
            title: &record.title,
            date: &record.date,
        };
        write_file(out, &format!("og/{}.png", record.id), og.render(&card)?)?;
        summary.images += 1;

        tracing::debug!(identifier = %record.id, "exported post");
    }

    write_file(out, "opengraph-image.png", og.render(&PreviewCard::Site)?)?;
    summary.images += 1;

    write_file(out, "robots.txt", ROBOTS_TXT)?;

    tracing::info!(
        out = %out.display(),
        pages = summary.pages,
        images = summary.images,
        assets = summary.assets,
        "site exported"
    );

    Ok(summary)
}

fn write_file(out: &Path, relative: &str, contents: impl AsRef<[u8]>) -> anyhow::Result<()> {
    let path = out.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Copy the public directory into `out`. A missing directory copies nothing.
fn copy_public_dir(public_dir: &Path, out: &Path) -> anyhow::Result<usize> {
    if !public_dir.is_dir() {
        tracing::warn!(dir = %public_dir.display(), "public directory not found, skipping assets");
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(public_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(public_dir)?;
        let target = out.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::copy(entry.path(), &target)
            .with_context(|| format!("copying {}", entry.path().display()))?;
        copied += 1;
    }
    Ok(copied)
}
